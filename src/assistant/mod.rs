//! Mock learning assistant
//!
//! The chat backend is an external collaborator with the contract
//! `send_prompt(text) -> reply`, always eventually resolving. The
//! shipped implementation keyword-matches canned study responses after
//! a short simulated network delay.

pub mod summarize;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub use summarize::summarize;

/// Greeting seeding every new conversation.
pub const GREETING: &str =
    "Hello! I'm your AI learning assistant. How can I help you with your studies today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Chat backend seam.
#[async_trait::async_trait]
pub trait ChatAssistant: Send + Sync {
    /// Produce a reply for the given prompt.
    async fn send_prompt(&self, prompt: &str) -> Result<String>;
}

/// Keyword-matched canned responses with a simulated network delay.
pub struct CannedAssistant {
    reply_delay: Duration,
}

impl CannedAssistant {
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    fn reply_for(prompt: &str) -> &'static str {
        let prompt = prompt.to_lowercase();

        if prompt.contains("math") || prompt.contains("equation") {
            "In mathematics, equations represent relationships between variables. \
             What specific concept are you struggling with?"
        } else if prompt.contains("science") || prompt.contains("biology") {
            "Science is all about discovery and understanding our world. \
             I'd be happy to explain any scientific concepts you're curious about!"
        } else if prompt.contains("literature") || prompt.contains("book") {
            "Literature analysis involves understanding the author's intent, historical \
             context, and various literary devices. What are you reading?"
        } else if prompt.contains("help") || prompt.contains("stuck") {
            "I understand this topic can be challenging. Let me break it down into \
             simpler steps for you. What specific part is confusing?"
        } else {
            "That's an interesting question! Would you like me to explain this topic \
             in more detail or provide some practice examples?"
        }
    }
}

#[async_trait::async_trait]
impl ChatAssistant for CannedAssistant {
    async fn send_prompt(&self, prompt: &str) -> Result<String> {
        // Simulated network latency before the canned pick.
        tokio::time::sleep(self.reply_delay).await;

        let reply = Self::reply_for(prompt);
        debug!("Assistant reply selected ({} chars)", reply.len());

        Ok(reply.to_string())
    }
}

/// An in-memory conversation, seeded with the assistant greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Restore the conversation to its seeded state.
    pub fn clear(&mut self) {
        self.messages = vec![Message::assistant(GREETING)];
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
