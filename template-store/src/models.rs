//! Series template model.

use crate::caption::render;
use serde::{Deserialize, Serialize};

/// Caption patterns for one series. `name` keys the store; both patterns may contain `{episode}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesTemplate {
    pub name: String,
    pub release: String,
    pub reserve: String,
}

impl SeriesTemplate {
    pub fn new(
        name: impl Into<String>,
        release: impl Into<String>,
        reserve: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            release: release.into(),
            reserve: reserve.into(),
        }
    }

    /// Renders the release and reserve captions for `episode`.
    pub fn captions(&self, episode: &str) -> (String, String) {
        (render(&self.release, episode), render(&self.reserve, episode))
    }
}

/// On-disk value under each series name: `{"release": ..., "reserve": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TemplateRecord {
    pub release: String,
    pub reserve: String,
}

impl From<&SeriesTemplate> for TemplateRecord {
    fn from(t: &SeriesTemplate) -> Self {
        Self {
            release: t.release.clone(),
            reserve: t.reserve.clone(),
        }
    }
}
