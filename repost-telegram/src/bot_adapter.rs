//! Wraps teloxide::Bot and implements [`repost_core::Bot`]. Production code talks to Telegram;
//! tests substitute another Bot impl.

use async_trait::async_trait;
use repost_core::{Bot as CoreBot, Chat, Menu, RepostError, Result, VideoRef};
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, ParseMode,
};

use crate::adapters::encode_choice;

/// Thin wrapper around teloxide::Bot that implements repost-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// The underlying teloxide::Bot, for API calls outside the core Bot trait.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn keyboard(menu: &Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.buttons.iter().map(|button| {
        vec![InlineKeyboardButton::callback(
            button.label.clone(),
            encode_choice(&button.choice),
        )]
    }))
}

fn transport(e: teloxide::RequestError) -> RepostError {
    RepostError::Transport(e.to_string())
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| RepostError::Transport(format!("Invalid message_id for edit: {}", s)))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, menu: &Menu) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard(menu))
            .await
            .map_err(transport)?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text.to_string())
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn send_video(&self, chat: &Chat, video: &VideoRef, caption: &str) -> Result<()> {
        self.bot
            .send_video(
                ChatId(chat.id),
                InputFile::file_id(FileId(video.as_str().to_string())),
            )
            .caption(caption.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(transport)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repost_core::Choice;

    #[test]
    fn test_parse_message_id() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    #[test]
    fn test_keyboard_has_one_button_per_row() {
        let menu = Menu::new()
            .button("Create template", Choice::CreateTemplate)
            .button("Edit template", Choice::EditTemplate);
        let markup = keyboard(&menu);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 1);
        assert_eq!(markup.inline_keyboard[1][0].text, "Edit template");
    }
}
