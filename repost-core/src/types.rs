//! Core types: chat and conversation identity, inbound events, menus, and distribution destinations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat (channel or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Private chat with the operator.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            chat_type: "private".to_string(),
        }
    }
}

/// Key of one conversation: the operator inside a chat. Sessions are scoped to this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub chat_id: i64,
    pub user_id: i64,
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chat_id, self.user_id)
    }
}

/// Opaque transport reference to an uploaded video (e.g. Telegram file id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef(pub String);

impl VideoRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Open the template menu (create / edit).
    Templates,
    /// List available commands and the upload procedure.
    Help,
    /// Abandon the current flow.
    Cancel,
}

/// A selectable menu option. Each variant is what a menu button carries back when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    /// "Create template" in the template menu.
    CreateTemplate,
    /// "Edit template" in the template menu.
    EditTemplate,
    /// A template picked from the edit selection menu.
    EditTarget { name: String },
    /// A series picked for the uploaded video.
    Series { name: String },
}

/// Inbound event, classified by the transport adapter before it reaches the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Command(Command),
    Chosen(Choice),
    TextEntered { value: String },
    VideoReceived { video_ref: VideoRef },
}

impl Event {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Command(Command::Templates) => "command_templates",
            Event::Command(Command::Help) => "command_help",
            Event::Command(Command::Cancel) => "command_cancel",
            Event::Chosen(Choice::CreateTemplate) => "create_template_chosen",
            Event::Chosen(Choice::EditTemplate) => "edit_template_chosen",
            Event::Chosen(Choice::EditTarget { .. }) => "edit_target_chosen",
            Event::Chosen(Choice::Series { .. }) => "series_chosen",
            Event::TextEntered { .. } => "text_entered",
            Event::VideoReceived { .. } => "video_received",
        }
    }
}

/// Event envelope: where it came from and, for button presses, the message carrying the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat: Chat,
    pub user_id: i64,
    /// Id of the message whose button was pressed; `None` for plain messages.
    pub origin_message_id: Option<String>,
    pub event: Event,
}

impl Inbound {
    pub fn new(chat: Chat, user_id: i64, event: Event) -> Self {
        Self {
            chat,
            user_id,
            origin_message_id: None,
            event,
        }
    }

    pub fn with_origin(mut self, message_id: impl Into<String>) -> Self {
        self.origin_message_id = Some(message_id.into());
        self
    }

    pub fn key(&self) -> ConversationKey {
        ConversationKey {
            chat_id: self.chat.id,
            user_id: self.user_id,
        }
    }
}

/// One button of a [`Menu`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub choice: Choice,
}

/// Selectable-options menu attached to an outbound message; one button per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub buttons: Vec<MenuButton>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(mut self, label: impl Into<String>, choice: Choice) -> Self {
        self.buttons.push(MenuButton {
            label: label.into(),
            choice,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

/// Which of the two distribution channels a destination is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestinationKind {
    Release,
    Reserve,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Release => f.write_str("release"),
            DestinationKind::Reserve => f.write_str("reserve"),
        }
    }
}

/// A configured distribution channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub kind: DestinationKind,
    pub chat_id: i64,
}

impl Destination {
    pub fn release(chat_id: i64) -> Self {
        Self {
            kind: DestinationKind::Release,
            chat_id,
        }
    }

    pub fn reserve(chat_id: i64) -> Self {
        Self {
            kind: DestinationKind::Reserve,
            chat_id,
        }
    }

    pub fn chat(&self) -> Chat {
        Chat {
            id: self.chat_id,
            chat_type: "channel".to_string(),
        }
    }
}
