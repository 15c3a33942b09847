//! Template store crate: series caption templates, their durable storage, and caption rendering.
//!
//! ## Modules
//!
//! - [`caption`] – placeholder substitution and episode number validation
//! - [`models`] – SeriesTemplate
//! - [`repository`] – TemplateStore trait
//! - [`json_store`] – JsonTemplateStore (single JSON file, rewritten on every upsert)

pub mod caption;
mod json_store;
mod models;
mod repository;


pub use caption::{is_episode_number, render, EPISODE_PLACEHOLDER};
pub use json_store::{JsonTemplateStore, DEFAULT_PERSIST_TIMEOUT};
pub use models::SeriesTemplate;
pub use repository::TemplateStore;
