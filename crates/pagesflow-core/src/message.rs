//! User feedback

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Status,
    Error,
}

/// Where user-facing messages go
///
/// Handed to the deployer at construction; nothing looks a sink up globally.
pub trait MessageSink: Send + Sync {
    fn add(&self, level: MessageLevel, text: &str);

    fn status(&self, text: &str) {
        self.add(MessageLevel::Status, text);
    }

    fn error(&self, text: &str) {
        self.add(MessageLevel::Error, text);
    }
}

/// Sink that keeps messages in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl MessageSink for MemorySink {
    fn add(&self, level: MessageLevel, text: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, text.to_string()));
        }
    }
}
