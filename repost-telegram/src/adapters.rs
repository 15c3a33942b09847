//! Adapters from Telegram (teloxide) updates to repost_core inbound events.
//! Depends only on teloxide and repost_core type definitions.

use repost_core::{Chat, Choice, Command, Event, Inbound, VideoRef};

const CREATE_TEMPLATE: &str = "create_template";
const EDIT_TEMPLATE: &str = "edit_template";
const EDIT_PREFIX: &str = "edit:";
const SERIES_PREFIX: &str = "series:";

/// Encodes a menu choice as callback data.
pub fn encode_choice(choice: &Choice) -> String {
    match choice {
        Choice::CreateTemplate => CREATE_TEMPLATE.to_string(),
        Choice::EditTemplate => EDIT_TEMPLATE.to_string(),
        Choice::EditTarget { name } => format!("{}{}", EDIT_PREFIX, name),
        Choice::Series { name } => format!("{}{}", SERIES_PREFIX, name),
    }
}

/// Decodes callback data produced by [`encode_choice`]. Unknown payloads yield `None`.
pub fn decode_choice(data: &str) -> Option<Choice> {
    match data {
        CREATE_TEMPLATE => Some(Choice::CreateTemplate),
        EDIT_TEMPLATE => Some(Choice::EditTemplate),
        _ => {
            if let Some(name) = data.strip_prefix(EDIT_PREFIX) {
                Some(Choice::EditTarget {
                    name: name.to_string(),
                })
            } else {
                data.strip_prefix(SERIES_PREFIX).map(|name| Choice::Series {
                    name: name.to_string(),
                })
            }
        }
    }
}

/// Recognizes `/templates`, `/help` (and `/start`), `/cancel`, with or without a `@botname` suffix.
/// Any other text, including unknown commands, is not a command.
pub fn parse_command(text: &str) -> Option<Command> {
    let word = text.split_whitespace().next()?.strip_prefix('/')?;
    let name = word.split('@').next().unwrap_or(word);
    match name {
        "templates" => Some(Command::Templates),
        "help" | "start" => Some(Command::Help),
        "cancel" => Some(Command::Cancel),
        _ => None,
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: format!("{:?}", chat.kind),
    }
}

/// Wraps a teloxide Message for conversion to an [`Inbound`] event.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Video attachment → `VideoReceived`; text → command or `TextEntered`; anything else → `None`.
    pub fn to_inbound(&self) -> Option<Inbound> {
        let msg = self.0;
        let event = if let Some(video) = msg.video() {
            Event::VideoReceived {
                video_ref: VideoRef::new(video.file.id.0.clone()),
            }
        } else {
            let text = msg.text()?;
            match parse_command(text) {
                Some(command) => Event::Command(command),
                None => Event::TextEntered {
                    value: text.to_string(),
                },
            }
        };
        Some(Inbound::new(core_chat(&msg.chat), self.user_id(), event))
    }

    fn user_id(&self) -> i64 {
        self.0.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(0)
    }
}

/// Wraps a teloxide CallbackQuery (inline button press) for conversion to an [`Inbound`] event.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    /// `None` when the payload is unknown or the button's message is not available.
    pub fn to_inbound(&self) -> Option<Inbound> {
        let query = self.0;
        let choice = decode_choice(query.data.as_deref()?)?;
        let message = query.message.as_ref()?;
        Some(
            Inbound::new(
                core_chat(message.chat()),
                query.from.id.0 as i64,
                Event::Chosen(choice),
            )
            .with_origin(message.id().to_string()),
        )
    }
}
