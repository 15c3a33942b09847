//! Bot abstraction for outbound actions.
//!
//! [`Bot`] is transport-agnostic; repost-telegram implements it via teloxide.

use crate::error::Result;
use crate::types::{Chat, Menu, VideoRef};
use async_trait::async_trait;

/// Outbound actions the conversation engine needs. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text message with a selectable-options menu and returns the sent message id.
    async fn send_menu(&self, chat: &Chat, text: &str, menu: &Menu) -> Result<String>;
    /// Edits an already-sent message. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Sends a video with a rich-text (HTML) caption to the given chat.
    async fn send_video(&self, chat: &Chat, video: &VideoRef, caption: &str) -> Result<()>;
}
