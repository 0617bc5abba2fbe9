use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drive_core::model::{LessonId, ProgressError, QuizResult, UserProgress};

use crate::repository::StorageError;

/// Key the progress record is stored under.
pub const PROGRESS_KEY: &str = "driveSafe_progress";

/// Persisted shape of a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizResultRecord {
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total: u32,
    pub passed: bool,
}

/// Persisted shape of `UserProgress`.
///
/// This is the one canonical schema: license flag tracked at the top level,
/// no per-quiz id. Every field is required and unknown fields are rejected,
/// so records written in any other shape read as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProgressRecord {
    pub completed_lessons: Vec<LessonId>,
    pub quiz_scores: Vec<QuizResultRecord>,
    pub has_license: bool,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            completed_lessons: progress.completed_lessons().to_vec(),
            quiz_scores: progress
                .quiz_scores()
                .iter()
                .map(|result| QuizResultRecord {
                    date: result.date(),
                    score: result.score(),
                    total: result.total(),
                    passed: result.passed(),
                })
                .collect(),
            has_license: progress.has_license(),
        }
    }

    /// Convert the record back into domain progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if any quiz attempt violates its invariants.
    pub fn into_progress(self) -> Result<UserProgress, ProgressError> {
        let quiz_scores = self
            .quiz_scores
            .into_iter()
            .map(|r| QuizResult::from_persisted(r.date, r.score, r.total, r.passed))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UserProgress::from_persisted(
            self.completed_lessons,
            quiz_scores,
            self.has_license,
        ))
    }

    /// Serialize to the stored JSON string.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Parse the stored JSON string.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the value is not a valid record.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

/// Decode a stored value straight into domain progress.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or invalid attempts.
pub fn decode_progress(raw: &str) -> Result<UserProgress, StorageError> {
    ProgressRecord::from_json(raw)?
        .into_progress()
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Encode domain progress into the stored JSON string.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_progress(progress: &UserProgress) -> Result<String, StorageError> {
    ProgressRecord::from_progress(progress).to_json()
}
