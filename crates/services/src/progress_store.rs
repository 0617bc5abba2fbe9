use std::sync::Arc;

use drive_core::model::{LessonId, QuizResult, UserProgress};
use storage::repository::{KeyValueStore, StorageError};
use storage::{PROGRESS_KEY, decode_progress, encode_progress};
use tracing::{debug, info, warn};

/// Owns the persisted progress record.
///
/// Every mutator is a load-mutate-save of the whole record. Storage failures
/// never reach the caller: they are logged and the caller gets back the
/// record as it was before the failed write. A mutator that cannot read the
/// stored record writes nothing.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read the stored record. A missing or malformed value is the empty
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself cannot be read.
    pub async fn try_load(&self) -> Result<UserProgress, StorageError> {
        let Some(raw) = self.kv.get(PROGRESS_KEY).await? else {
            return Ok(UserProgress::default());
        };
        Ok(decode_progress(&raw).unwrap_or_else(|err| {
            warn!(key = PROGRESS_KEY, error = %err, "stored progress is malformed; using defaults");
            UserProgress::default()
        }))
    }

    /// Load the stored record, or the empty default when there is none or it
    /// cannot be read.
    pub async fn load(&self) -> UserProgress {
        self.try_load().await.unwrap_or_else(|err| {
            warn!(key = PROGRESS_KEY, error = %err, "failed to read progress; using defaults");
            UserProgress::default()
        })
    }

    /// Persist the whole record, overwriting what was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn try_save(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let raw = encode_progress(progress)?;
        self.kv.set(PROGRESS_KEY, &raw).await
    }

    /// Persist the whole record, logging instead of failing.
    pub async fn save(&self, progress: &UserProgress) {
        if let Err(err) = self.try_save(progress).await {
            warn!(key = PROGRESS_KEY, error = %err, "failed to save progress");
        }
    }

    /// Add a lesson to the completed set. Repeating an id changes nothing.
    pub async fn mark_lesson_complete(&self, lesson_id: LessonId) -> UserProgress {
        let Some(before) = self.load_for_update().await else {
            return UserProgress::default();
        };
        let mut after = before.clone();
        if !after.mark_lesson_complete(lesson_id) {
            return before;
        }
        debug!(lesson = %lesson_id, "lesson completed");
        self.commit(before, after).await
    }

    /// Append a quiz attempt to the history.
    pub async fn record_quiz_result(&self, result: QuizResult) -> UserProgress {
        let Some(before) = self.load_for_update().await else {
            return UserProgress::default();
        };
        let mut after = before.clone();
        debug!(
            score = result.score(),
            total = result.total(),
            passed = result.passed(),
            "quiz result recorded"
        );
        after.record_quiz_result(result);
        self.commit(before, after).await
    }

    /// Set the license flag.
    pub async fn issue_license(&self) -> UserProgress {
        let Some(before) = self.load_for_update().await else {
            return UserProgress::default();
        };
        let mut after = before.clone();
        if !after.issue_license() {
            return before;
        }
        info!("driver license issued");
        self.commit(before, after).await
    }

    /// Overwrite the stored record with the empty default.
    pub async fn reset(&self) -> UserProgress {
        let empty = UserProgress::default();
        match self.try_save(&empty).await {
            Ok(()) => {
                info!("progress reset");
                empty
            }
            Err(err) => {
                warn!(key = PROGRESS_KEY, error = %err, "failed to reset progress");
                self.load().await
            }
        }
    }

    // `None` means the backend could not be read; the caller must not write.
    async fn load_for_update(&self) -> Option<UserProgress> {
        match self.try_load().await {
            Ok(progress) => Some(progress),
            Err(err) => {
                warn!(key = PROGRESS_KEY, error = %err, "failed to read progress; update skipped");
                None
            }
        }
    }

    async fn commit(&self, before: UserProgress, after: UserProgress) -> UserProgress {
        match self.try_save(&after).await {
            Ok(()) => after,
            Err(err) => {
                warn!(key = PROGRESS_KEY, error = %err, "failed to save progress; keeping previous state");
                before
            }
        }
    }
}
