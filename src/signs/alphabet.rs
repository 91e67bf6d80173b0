//! Character-to-sign symbol table
//!
//! A fixed dictionary mapping each ASCII letter (plus space and basic
//! punctuation) to a pictographic stand-in. The mapping is total over
//! all input: anything outside the dictionary passes through unchanged,
//! so every character maps to exactly one output symbol.

/// Look up the sign glyph for a single (lowercase) character.
pub fn glyph_for(c: char) -> Option<&'static str> {
    match c {
        'a' => Some("👆"),
        'b' => Some("👋"),
        'c' => Some("👌"),
        'd' => Some("👍"),
        'e' => Some("🤟"),
        'f' => Some("👊"),
        'g' => Some("👉"),
        'h' => Some("🤙"),
        'i' => Some("🖐️"),
        'j' => Some("🤞"),
        'k' => Some("🤘"),
        'l' => Some("👋"),
        'm' => Some("👇"),
        'n' => Some("👈"),
        'o' => Some("👌"),
        'p' => Some("👆"),
        'q' => Some("👋"),
        'r' => Some("🤘"),
        's' => Some("✊"),
        't' => Some("👍"),
        'u' => Some("🤟"),
        'v' => Some("✌️"),
        'w' => Some("👌"),
        'x' => Some("🤙"),
        'y' => Some("🤘"),
        'z' => Some("👈"),
        ' ' => Some(" "),
        '.' => Some("."),
        '?' => Some("?"),
        '!' => Some("!"),
        _ => None,
    }
}

/// Convert input text into its sign sequence.
///
/// Input is lowercased first; characters without a dictionary entry
/// fall back to themselves.
pub fn transcribe(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| match glyph_for(c) {
            Some(glyph) => glyph.to_string(),
            None => c.to_string(),
        })
        .collect()
}
