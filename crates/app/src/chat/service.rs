//! Chat service trait.

use async_trait::async_trait;
use mockall::automock;

use crate::chat::{ChatMessage, ChatServiceError};

#[automock]
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Forward the conversation to the assistant provider and return its
    /// reply. `history` is oldest-first and already includes the latest
    /// user message.
    async fn reply(&self, history: &[ChatMessage]) -> Result<ChatMessage, ChatServiceError>;
}
