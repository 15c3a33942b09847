//! Session state machine: a pure function from (session, event, known template names) to the
//! next session and the actions to perform.
//!
//! Flow-starting events (template menu buttons, a video) start their flow from any state and
//! drop an abandoned flow's fields. Flow-continuing events that do not fit the current state
//! leave it unchanged and re-prompt.

use repost_core::{Choice, Command, Event, Menu, VideoRef};
use template_store::{is_episode_number, SeriesTemplate};
use tracing::warn;

use crate::messages;
use crate::state::{Session, State};

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send text to the conversation.
    Reply(String),
    /// Send text with a selectable-options menu.
    ReplyWithMenu { text: String, menu: Menu },
    /// Replace the text of the message whose button was pressed (new message when unknown).
    EditOrigin(String),
    /// Upsert the template, then confirm or report the failure.
    SaveTemplate(SeriesTemplate),
    /// Render the series captions for `episode` and publish `video_ref` to both destinations.
    Publish {
        video_ref: VideoRef,
        series: String,
        episode: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub actions: Vec<Action>,
}

impl Transition {
    fn to(state: State, actions: Vec<Action>) -> Self {
        Self {
            session: Session::new(state),
            actions,
        }
    }

    fn stay(session: &Session, actions: Vec<Action>) -> Self {
        Self {
            session: session.clone(),
            actions,
        }
    }
}

fn reply(text: impl Into<String>) -> Action {
    Action::Reply(text.into())
}

fn template_menu() -> Menu {
    Menu::new()
        .button(messages::CREATE_BUTTON, Choice::CreateTemplate)
        .button(messages::EDIT_BUTTON, Choice::EditTemplate)
}

/// Names that fit a button payload. Longer ones can only come from a template file written
/// elsewhere; they are left out of menus.
fn selectable(names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| {
            let fits = name.len() <= messages::MAX_TEMPLATE_NAME_BYTES;
            if !fits {
                warn!(
                    name = %name,
                    bytes = name.len(),
                    "Template name too long for a menu button, left out"
                );
            }
            fits
        })
        .cloned()
        .collect()
}

fn edit_menu(names: &[String]) -> Menu {
    names.iter().fold(Menu::new(), |menu, name| {
        menu.button(name.clone(), Choice::EditTarget { name: name.clone() })
    })
}

fn series_menu(names: &[String]) -> Menu {
    names.iter().fold(Menu::new(), |menu, name| {
        menu.button(name.clone(), Choice::Series { name: name.clone() })
    })
}

/// Computes the next session and actions. `template_names` is the store's current name list.
pub fn transition(session: &Session, event: &Event, template_names: &[String]) -> Transition {
    let known = |name: &str| template_names.iter().any(|n| n == name);

    match event {
        Event::Command(Command::Help) => Transition::stay(session, vec![reply(messages::HELP)]),
        Event::Command(Command::Templates) => Transition::stay(
            session,
            vec![Action::ReplyWithMenu {
                text: messages::TEMPLATE_MENU.to_string(),
                menu: template_menu(),
            }],
        ),
        Event::Command(Command::Cancel) => {
            if session.is_idle() {
                Transition::stay(session, vec![reply(messages::NOTHING_TO_CANCEL)])
            } else {
                Transition::to(State::Idle, vec![reply(messages::CANCELLED)])
            }
        }

        Event::Chosen(Choice::CreateTemplate) => Transition::to(
            State::AwaitingTemplateName,
            vec![reply(messages::ASK_TEMPLATE_NAME)],
        ),
        Event::Chosen(Choice::EditTemplate) => {
            let names = selectable(template_names);
            if names.is_empty() {
                Transition::to(State::Idle, vec![reply(messages::NO_TEMPLATES_TO_EDIT)])
            } else {
                Transition::to(
                    State::AwaitingEditChoice,
                    vec![Action::ReplyWithMenu {
                        text: messages::CHOOSE_TEMPLATE_TO_EDIT.to_string(),
                        menu: edit_menu(&names),
                    }],
                )
            }
        }
        Event::Chosen(Choice::EditTarget { name }) => match &session.state {
            State::AwaitingEditChoice if known(name) => Transition::to(
                State::AwaitingReleaseText {
                    name: name.clone(),
                    editing: true,
                },
                vec![reply(messages::editing(name))],
            ),
            State::AwaitingEditChoice => {
                Transition::stay(session, vec![reply(messages::template_missing(name))])
            }
            _ => Transition::stay(session, vec![reply(messages::STALE_EDIT_MENU)]),
        },
        Event::Chosen(Choice::Series { name }) => match &session.state {
            State::AwaitingSeriesChoice { video_ref } if known(name) => Transition::to(
                State::AwaitingEpisodeNumber {
                    video_ref: video_ref.clone(),
                    series: name.clone(),
                },
                vec![Action::EditOrigin(messages::series_selected(name))],
            ),
            State::AwaitingSeriesChoice { .. } => {
                Transition::stay(session, vec![reply(messages::template_missing(name))])
            }
            _ => Transition::stay(session, vec![reply(messages::STALE_SERIES_MENU)]),
        },

        Event::VideoReceived { video_ref } => {
            let names = selectable(template_names);
            if names.is_empty() {
                // No upload flow starts, so whatever the operator was doing continues.
                Transition::stay(session, vec![reply(messages::NO_TEMPLATES_FOR_UPLOAD)])
            } else {
                Transition::to(
                    State::AwaitingSeriesChoice {
                        video_ref: video_ref.clone(),
                    },
                    vec![Action::ReplyWithMenu {
                        text: messages::CHOOSE_SERIES.to_string(),
                        menu: series_menu(&names),
                    }],
                )
            }
        }

        Event::TextEntered { value } => on_text(session, value, template_names),
    }
}

fn on_text(session: &Session, value: &str, template_names: &[String]) -> Transition {
    match &session.state {
        State::Idle => Transition::stay(session, vec![reply(messages::IDLE_HINT)]),

        State::AwaitingTemplateName => {
            let name = value.trim();
            if name.is_empty() {
                Transition::stay(session, vec![reply(messages::EMPTY_NAME)])
            } else if name.len() > messages::MAX_TEMPLATE_NAME_BYTES {
                Transition::stay(session, vec![reply(messages::name_too_long())])
            } else {
                let prompt = if template_names.iter().any(|n| n == name) {
                    messages::replacing_existing(name)
                } else {
                    messages::ASK_RELEASE_TEXT.to_string()
                };
                Transition::to(
                    State::AwaitingReleaseText {
                        name: name.to_string(),
                        editing: false,
                    },
                    vec![reply(prompt)],
                )
            }
        }

        State::AwaitingReleaseText { name, editing } => {
            if value.trim().is_empty() {
                Transition::stay(
                    session,
                    vec![reply(format!(
                        "{} {}",
                        messages::EMPTY_TEXT,
                        messages::ASK_RELEASE_TEXT
                    ))],
                )
            } else {
                Transition::to(
                    State::AwaitingReserveText {
                        name: name.clone(),
                        release: value.to_string(),
                        editing: *editing,
                    },
                    vec![reply(messages::ASK_RESERVE_TEXT)],
                )
            }
        }

        State::AwaitingReserveText { name, release, .. } => {
            if value.trim().is_empty() {
                Transition::stay(
                    session,
                    vec![reply(format!(
                        "{} {}",
                        messages::EMPTY_TEXT,
                        messages::ASK_RESERVE_TEXT
                    ))],
                )
            } else {
                Transition::to(
                    State::Idle,
                    vec![Action::SaveTemplate(SeriesTemplate::new(
                        name.clone(),
                        release.clone(),
                        value,
                    ))],
                )
            }
        }

        State::AwaitingEditChoice | State::AwaitingSeriesChoice { .. } => {
            Transition::stay(session, vec![reply(messages::CHOOSE_FROM_MENU)])
        }

        State::AwaitingEpisodeNumber { video_ref, series } => {
            if is_episode_number(value) {
                Transition::to(
                    State::Idle,
                    vec![Action::Publish {
                        video_ref: video_ref.clone(),
                        series: series.clone(),
                        episode: value.to_string(),
                    }],
                )
            } else {
                Transition::stay(session, vec![reply(messages::EPISODE_NUMBER_ONLY)])
            }
        }
    }
}
