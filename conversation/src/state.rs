//! Session state. Each awaiting state carries exactly the fields its flow has captured so far,
//! so returning to [`State::Idle`] drops them all.

use repost_core::VideoRef;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    AwaitingTemplateName,
    AwaitingReleaseText {
        name: String,
        /// Entered through the edit flow rather than creation.
        editing: bool,
    },
    AwaitingReserveText {
        name: String,
        release: String,
        editing: bool,
    },
    AwaitingEditChoice,
    AwaitingSeriesChoice {
        video_ref: VideoRef,
    },
    AwaitingEpisodeNumber {
        video_ref: VideoRef,
        series: String,
    },
}

impl State {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::AwaitingTemplateName => "awaiting_template_name",
            State::AwaitingReleaseText { .. } => "awaiting_release_text",
            State::AwaitingReserveText { .. } => "awaiting_reserve_text",
            State::AwaitingEditChoice => "awaiting_edit_choice",
            State::AwaitingSeriesChoice { .. } => "awaiting_series_choice",
            State::AwaitingEpisodeNumber { .. } => "awaiting_episode_number",
        }
    }
}

/// Flat view of whatever the current flow has captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingFields {
    pub template_name: Option<String>,
    pub release_text: Option<String>,
    pub video_ref: Option<VideoRef>,
    pub series_name: Option<String>,
}

/// Conversation session: current state plus the pending fields it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: State,
}

impl Session {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    pub fn pending(&self) -> PendingFields {
        match &self.state {
            State::Idle | State::AwaitingTemplateName | State::AwaitingEditChoice => {
                PendingFields::default()
            }
            State::AwaitingReleaseText { name, .. } => PendingFields {
                template_name: Some(name.clone()),
                ..Default::default()
            },
            State::AwaitingReserveText { name, release, .. } => PendingFields {
                template_name: Some(name.clone()),
                release_text: Some(release.clone()),
                ..Default::default()
            },
            State::AwaitingSeriesChoice { video_ref } => PendingFields {
                video_ref: Some(video_ref.clone()),
                ..Default::default()
            },
            State::AwaitingEpisodeNumber { video_ref, series } => PendingFields {
                video_ref: Some(video_ref.clone()),
                series_name: Some(series.clone()),
                ..Default::default()
            },
        }
    }
}
