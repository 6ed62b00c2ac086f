//! The fixed instruction block prepended to every relayed conversation.

use super::types::ChatMessage;
use std::fmt;
use std::sync::Arc;

const EMBEDDED_PROMPT: &str = include_str!("../../prompts/system.md");

/// Immutable system prompt shared by every request.
///
/// Cloning is cheap; the text lives behind an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct SystemPrompt(Arc<str>);

impl SystemPrompt {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// The MRSC "Daedalus Core" prompt compiled into the binary.
    pub fn embedded() -> Self {
        Self::new(EMBEDDED_PROMPT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::system(self.as_str())
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self::embedded()
    }
}

// The prompt is several kilobytes; keep debug output readable.
impl fmt::Debug for SystemPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemPrompt")
            .field("len", &self.0.len())
            .finish()
    }
}
