use crate::types::DestinationKind;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepostError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result of one outbound video send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent)
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Sent => f.write_str("sent"),
            DeliveryOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// At least one distribution send failed. Carries the outcome of both destinations so a
/// partial publish (one sent, one failed) can be told apart from a total failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("release: {release}; reserve: {reserve}")]
pub struct PublishError {
    pub release: DeliveryOutcome,
    pub reserve: DeliveryOutcome,
}

impl PublishError {
    pub fn outcome(&self, kind: DestinationKind) -> &DeliveryOutcome {
        match kind {
            DestinationKind::Release => &self.release,
            DestinationKind::Reserve => &self.reserve,
        }
    }

    /// Destinations whose send failed.
    pub fn failed(&self) -> Vec<DestinationKind> {
        [DestinationKind::Release, DestinationKind::Reserve]
            .into_iter()
            .filter(|kind| !self.outcome(*kind).is_sent())
            .collect()
    }

    /// True when exactly one destination received the video.
    pub fn is_partial(&self) -> bool {
        self.release.is_sent() != self.reserve.is_sent()
    }
}

pub type Result<T> = std::result::Result<T, RepostError>;
