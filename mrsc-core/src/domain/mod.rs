pub mod prompt;
pub mod types;

pub use prompt::SystemPrompt;
pub use types::{ChatMessage, MessageRole};
