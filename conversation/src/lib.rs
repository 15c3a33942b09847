//! # Conversation
//!
//! Drives the two operator workflows: authoring/editing series templates, and publishing an
//! uploaded video to the release and reserve channels.
//!
//! [`transition`] is a pure `(Session, Event) -> (Session, Actions)` function; [`ConversationEngine`]
//! resolves the caller's session, runs the transition, and performs the resulting actions through
//! the [`repost_core::Bot`], the [`template_store::TemplateStore`], and the [`Publisher`].

mod engine;
mod machine;
pub mod messages;
mod publisher;
mod state;
mod store;

pub use engine::ConversationEngine;
pub use machine::{transition, Action, Transition};
pub use publisher::{Publisher, DEFAULT_SEND_TIMEOUT};
pub use state::{PendingFields, Session, State};
pub use store::{InMemorySessionStore, SessionStore};
