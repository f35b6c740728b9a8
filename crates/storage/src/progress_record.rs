use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tutorial_core::model::{ProgressState, SectionId, TutorialStack};

/// Key prefix of persisted progress entries; the stack slug follows.
pub const PROGRESS_KEY_PREFIX: &str = "tutorial-progress-";

/// Storage key for a stack's progress, e.g. `tutorial-progress-docker`.
#[must_use]
pub fn progress_key(stack: TutorialStack) -> String {
    format!("{PROGRESS_KEY_PREFIX}{}", stack.slug())
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("malformed progress record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persisted shape of a stack's progress.
///
/// ```json
/// { "completedSections": ["intro"], "currentSection": null, "lastUpdated": "2023-11-14T22:13:20Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub completed_sections: Vec<SectionId>,
    pub current_section: Option<SectionId>,
    pub last_updated: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &ProgressState) -> Self {
        Self {
            completed_sections: state.completed().iter().cloned().collect(),
            current_section: state.current().cloned(),
            last_updated: state.last_updated(),
        }
    }

    /// Duplicate ids collapse into one entry.
    #[must_use]
    pub fn into_state(self) -> ProgressState {
        ProgressState::from_persisted(
            self.completed_sections,
            self.current_section,
            self.last_updated,
        )
    }

    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if serialization fails.
    pub fn encode(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse stored text. Wrong JSON, a wrong shape, or a blank section id
    /// are all reported as `RecordError::Malformed`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if `text` is not a valid record.
    pub fn decode(text: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(text)?)
    }
}
