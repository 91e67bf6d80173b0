use anyhow::Result;
use std::sync::Mutex;

/// Clipboard-write seam
///
/// The service itself has no system clipboard; UI hosts provide one.
/// The in-memory implementation below backs headless deployments and
/// tests.
pub trait Clipboard: Send + Sync {
    /// Write text to the clipboard, replacing its contents.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard that simply remembers the last written text.
#[derive(Default)]
pub struct MemoryClipboard {
    last: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_copied(&self) -> Option<String> {
        self.last.lock().ok()?.clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut last = self
            .last
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        *last = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_last_written_text() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.last_copied(), None);

        clipboard.write_text("🤙🖐️!").unwrap();
        clipboard.write_text("👋").unwrap();
        assert_eq!(clipboard.last_copied(), Some("👋".to_string()));
    }
}
