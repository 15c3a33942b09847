//! Mock implementation of [`repost_core::Bot`] for integration tests.
//!
//! Records every outbound call so tests can assert on what the operator and the channels
//! received, without hitting Telegram. Video sends to configured chats fail or stall, and
//! menus can be made to fail as Telegram does for a rejected keyboard.

use async_trait::async_trait;
use repost_core::{Bot, Chat, Choice, Menu, RepostError, Result, VideoRef};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        chat_id: i64,
        text: String,
    },
    Menu {
        chat_id: i64,
        text: String,
        choices: Vec<Choice>,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Video {
        chat_id: i64,
        video: String,
        caption: String,
    },
}

pub struct MockBot {
    sent_tx: mpsc::UnboundedSender<Sent>,
    failing_video_chats: HashSet<i64>,
    slow_video_chats: HashSet<i64>,
    video_delay: Duration,
    failing_menus: bool,
    next_message_id: AtomicU64,
}

impl MockBot {
    /// Creates a MockBot whose `send_video` fails for every chat in `failing_video_chats`.
    pub fn new(
        sent_tx: mpsc::UnboundedSender<Sent>,
        failing_video_chats: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            sent_tx,
            failing_video_chats: failing_video_chats.into_iter().collect(),
            slow_video_chats: HashSet::new(),
            video_delay: Duration::ZERO,
            failing_menus: false,
            next_message_id: AtomicU64::new(100),
        }
    }

    /// Video sends to `chat_id` take `delay` before succeeding.
    pub fn with_slow_video_chat(mut self, chat_id: i64, delay: Duration) -> Self {
        self.slow_video_chats.insert(chat_id);
        self.video_delay = delay;
        self
    }

    /// Every `send_menu` fails and nothing is shown.
    pub fn with_failing_menus(mut self) -> Self {
        self.failing_menus = true;
        self
    }
}

/// Takes every call recorded so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Sent>) -> Vec<Sent> {
    let mut out = Vec::new();
    while let Ok(sent) = rx.try_recv() {
        out.push(sent);
    }
    out
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let _ = self.sent_tx.send(Sent::Message {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, menu: &Menu) -> Result<String> {
        if self.failing_menus {
            return Err(RepostError::Transport(
                "Bad Request: BUTTON_DATA_INVALID".into(),
            ));
        }
        let _ = self.sent_tx.send(Sent::Menu {
            chat_id: chat.id,
            text: text.to_string(),
            choices: menu.buttons.iter().map(|b| b.choice.clone()).collect(),
        });
        Ok(self.next_message_id.fetch_add(1, Ordering::SeqCst).to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let _ = self.sent_tx.send(Sent::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_video(&self, chat: &Chat, video: &VideoRef, caption: &str) -> Result<()> {
        let _ = self.sent_tx.send(Sent::Video {
            chat_id: chat.id,
            video: video.to_string(),
            caption: caption.to_string(),
        });
        if self.slow_video_chats.contains(&chat.id) {
            tokio::time::sleep(self.video_delay).await;
        }
        if self.failing_video_chats.contains(&chat.id) {
            return Err(RepostError::Transport("Forbidden: bot is not a member".into()));
        }
        Ok(())
    }
}
