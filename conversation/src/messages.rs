//! Operator-facing texts.

use repost_core::{DestinationKind, PublishError};

/// Menu payloads carry the series name; keep it within chat-button payload limits.
pub const MAX_TEMPLATE_NAME_BYTES: usize = 56;

pub const HELP: &str = "Available commands:\n\n\
    /templates - Template menu (create or edit a template)\n\
    /help - Show this list of commands\n\
    /cancel - Abandon the current step\n\n\
    To send a video:\n\
    1. Send the video to the bot\n\
    2. Choose the series\n\
    3. Enter the episode number\n\
    The bot posts the episode to the channels automatically.";

pub const TEMPLATE_MENU: &str = "Choose an action:";
pub const CREATE_BUTTON: &str = "Create template";
pub const EDIT_BUTTON: &str = "Edit template";

pub const ASK_TEMPLATE_NAME: &str = "Enter the name of the new series:";
pub const ASK_RELEASE_TEXT: &str =
    "Enter the text for the release post (use {episode} for the episode number):";
pub const ASK_RESERVE_TEXT: &str =
    "Enter the text for the reserve post (use {episode} for the episode number):";
pub const EMPTY_NAME: &str = "The series name must not be empty. Enter the name of the new series:";
pub const EMPTY_TEXT: &str = "The text must not be empty.";

pub const NO_TEMPLATES_TO_EDIT: &str = "There are no templates to edit.";
pub const CHOOSE_TEMPLATE_TO_EDIT: &str = "Choose a template to edit:";

pub const CHOOSE_SERIES: &str = "Choose the series:";
pub const NO_TEMPLATES_FOR_UPLOAD: &str =
    "There are no series templates yet. Create one with /templates";
pub const EPISODE_NUMBER_ONLY: &str = "Enter only the episode number (e.g. 25)";

pub const CHOOSE_FROM_MENU: &str = "Please choose an option from the menu above.";
pub const STALE_EDIT_MENU: &str = "This menu is outdated. Open /templates again.";
pub const STALE_SERIES_MENU: &str = "This menu is outdated. Send the video again.";
pub const IDLE_HINT: &str =
    "Send a video to publish an episode, or use /help to see the commands.";

pub const MENU_NOT_SHOWN: &str = "❌ Could not show the menu; nothing was changed. Try again.";

pub const CANCELLED: &str = "Cancelled.";
pub const NOTHING_TO_CANCEL: &str = "Nothing to cancel.";

pub fn name_too_long() -> String {
    format!(
        "The series name is too long (at most {} bytes). Enter a shorter name:",
        MAX_TEMPLATE_NAME_BYTES
    )
}

pub fn replacing_existing(name: &str) -> String {
    format!(
        "A template named '{}' already exists and will be replaced.\n{}",
        name, ASK_RELEASE_TEXT
    )
}

pub fn editing(name: &str) -> String {
    format!(
        "Editing template '{}'.\nEnter the new text for the release post (or send the old one to keep it unchanged):",
        name
    )
}

pub fn template_saved(name: &str) -> String {
    format!("✅ Template for series '{}' saved!", name)
}

pub fn template_not_saved(name: &str, reason: &str) -> String {
    format!(
        "❌ Template '{}' was not saved: {}\nStart again with /templates.",
        name, reason
    )
}

pub fn template_missing(name: &str) -> String {
    format!("Template '{}' no longer exists. Choose another one.", name)
}

pub fn series_selected(name: &str) -> String {
    format!(
        "Series selected: {}\nEnter the episode number (e.g. 25)",
        name
    )
}

pub fn episode_published(episode: &str, series: &str) -> String {
    format!(
        "✅ Episode {} of series '{}' sent to the channels",
        episode, series
    )
}

pub fn series_missing(series: &str) -> String {
    format!(
        "❌ Template '{}' no longer exists; nothing was sent. Send the video again.",
        series
    )
}

pub fn episode_not_published(episode: &str, series: &str, err: &PublishError) -> String {
    let mut text = format!(
        "❌ Episode {} of series '{}' was not fully published:\n",
        episode, series
    );
    for kind in [DestinationKind::Release, DestinationKind::Reserve] {
        text.push_str(&format!("• {} channel: {}\n", kind, err.outcome(kind)));
    }
    if err.is_partial() {
        let failed: Vec<String> = err.failed().iter().map(|kind| kind.to_string()).collect();
        text.push_str(&format!(
            "Resend the video to the {} channel manually.",
            failed.join(", ")
        ));
    } else {
        text.push_str("Send the video again to retry.");
    }
    text
}
