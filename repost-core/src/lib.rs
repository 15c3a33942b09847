//! # repost-core
//!
//! Core types and traits for the series repost bot: [`Bot`], inbound [`Event`]s, menus,
//! distribution destinations, errors, and tracing initialization. Transport-agnostic; used by
//! template-store, conversation, and repost-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DeliveryOutcome, PublishError, RepostError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Choice, Command, ConversationKey, Destination, DestinationKind, Event, Inbound, Menu,
    MenuButton, VideoRef,
};
