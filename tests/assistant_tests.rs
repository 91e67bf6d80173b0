// Integration tests for the mock assistant and summarizer

use able_service::assistant::{
    summarize, CannedAssistant, ChatAssistant, Conversation, Message, Role, GREETING,
};
use std::time::Duration;

fn assistant() -> CannedAssistant {
    // No simulated latency in tests.
    CannedAssistant::new(Duration::ZERO)
}

#[tokio::test]
async fn keyword_routing_picks_the_matching_reply() {
    let assistant = assistant();

    let reply = assistant
        .send_prompt("Can you explain this equation?")
        .await
        .unwrap();
    assert!(reply.contains("equations represent relationships"));

    let reply = assistant.send_prompt("I love BIOLOGY").await.unwrap();
    assert!(reply.contains("Science is all about discovery"));

    let reply = assistant
        .send_prompt("what book should I read")
        .await
        .unwrap();
    assert!(reply.contains("Literature analysis"));

    let reply = assistant.send_prompt("I'm stuck on this").await.unwrap();
    assert!(reply.contains("break it down into"));
}

#[tokio::test]
async fn unknown_prompts_get_the_generic_reply() {
    let reply = assistant().send_prompt("tell me anything").await.unwrap();
    assert!(reply.starts_with("That's an interesting question!"));
}

#[tokio::test]
async fn replies_always_eventually_resolve() {
    let assistant = CannedAssistant::new(Duration::from_millis(50));
    let reply = assistant.send_prompt("math").await.unwrap();
    assert!(!reply.is_empty());
}

#[test]
fn conversations_are_seeded_with_the_greeting() {
    let conversation = Conversation::new();

    assert_eq!(conversation.messages().len(), 1);
    assert_eq!(conversation.messages()[0].role, Role::Assistant);
    assert_eq!(conversation.messages()[0].content, GREETING);
}

#[test]
fn clear_restores_the_seeded_state() {
    let mut conversation = Conversation::new();
    conversation.push(Message::user("hello"));
    conversation.push(Message::assistant("hi there"));
    assert_eq!(conversation.messages().len(), 3);

    conversation.clear();
    assert_eq!(conversation.messages().len(), 1);
    assert_eq!(conversation.messages()[0].content, GREETING);
}

#[test]
fn summarizer_shortens_only_long_text() {
    let long = "word ".repeat(60);
    let summary = summarize(&long).unwrap();
    assert!(summary.ends_with("..."));
    assert!(summary.chars().count() < long.chars().count());

    assert_eq!(
        summarize("Short and sweet.").unwrap(),
        "The text is already concise."
    );
}
