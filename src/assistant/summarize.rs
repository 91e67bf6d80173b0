use anyhow::{bail, Result};

/// Text considered too short to shorten further.
const CONCISE_REPLY: &str = "The text is already concise.";

/// Mock summarizer: text longer than 100 characters keeps its first
/// third (by characters) plus an ellipsis; shorter text is reported as
/// already concise. Empty input is an error.
pub fn summarize(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        bail!("no text to summarize");
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 100 {
        return Ok(CONCISE_REPLY.to_string());
    }

    let mut summary: String = chars[..chars.len() / 3].iter().collect();
    summary.push_str("...");
    Ok(summary)
}
