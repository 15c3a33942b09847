//! # repost-telegram
//!
//! Telegram layer: classifies teloxide updates into [`repost_core::Inbound`] events, implements
//! [`repost_core::Bot`] with inline keyboards and HTML video captions, loads configuration from the
//! environment, and runs the update dispatcher that feeds the conversation engine.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{
    decode_choice, encode_choice, parse_command, TelegramCallbackWrapper, TelegramMessageWrapper,
};
pub use bot_adapter::TelegramBotAdapter;
pub use config::RepostConfig;
pub use runner::{build_engine, run_bot};
