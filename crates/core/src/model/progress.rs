use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::LessonId;

/// Minimum percentage of correct answers for a quiz or exam to count as passed.
pub const PASSING_PERCENT: u32 = 80;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("quiz result must cover at least one question")]
    EmptyQuiz,

    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("stored passed flag ({stored}) does not match score {score}/{total}")]
    PassedMismatch { stored: bool, score: u32, total: u32 },
}

//
// ─── QUIZ RESULT ──────────────────────────────────────────────────────────────
//

/// One submitted practice-quiz attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    date: DateTime<Utc>,
    score: u32,
    total: u32,
    passed: bool,
}

impl QuizResult {
    /// Build a result, deriving `passed` from the score ratio.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::EmptyQuiz` when `total` is zero and
    /// `ProgressError::ScoreExceedsTotal` when `score > total`.
    pub fn new(date: DateTime<Utc>, score: u32, total: u32) -> Result<Self, ProgressError> {
        if total == 0 {
            return Err(ProgressError::EmptyQuiz);
        }
        if score > total {
            return Err(ProgressError::ScoreExceedsTotal { score, total });
        }

        Ok(Self {
            date,
            score,
            total,
            passed: meets_pass_mark(score, total),
        })
    }

    /// Rehydrate a result from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`QuizResult::new`], plus
    /// `ProgressError::PassedMismatch` if the stored flag disagrees with the score.
    pub fn from_persisted(
        date: DateTime<Utc>,
        score: u32,
        total: u32,
        passed: bool,
    ) -> Result<Self, ProgressError> {
        let result = Self::new(date, score, total)?;
        if result.passed != passed {
            return Err(ProgressError::PassedMismatch {
                stored: passed,
                score,
                total,
            });
        }
        Ok(result)
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }
}

fn meets_pass_mark(score: u32, total: u32) -> bool {
    u64::from(score) * 100 >= u64::from(PASSING_PERCENT) * u64::from(total)
}

//
// ─── USER PROGRESS ────────────────────────────────────────────────────────────
//

/// The persisted aggregate of a learner's completed lessons, quiz history,
/// and license status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProgress {
    completed_lessons: Vec<LessonId>,
    quiz_scores: Vec<QuizResult>,
    has_license: bool,
}

impl UserProgress {
    /// Rehydrate progress from storage.
    ///
    /// Duplicate lesson ids are collapsed, keeping the first occurrence.
    #[must_use]
    pub fn from_persisted(
        completed_lessons: impl IntoIterator<Item = LessonId>,
        quiz_scores: Vec<QuizResult>,
        has_license: bool,
    ) -> Self {
        let mut progress = Self {
            completed_lessons: Vec::new(),
            quiz_scores,
            has_license,
        };
        for id in completed_lessons {
            progress.mark_lesson_complete(id);
        }
        progress
    }

    /// Completed lesson ids in the order they were completed.
    #[must_use]
    pub fn completed_lessons(&self) -> &[LessonId] {
        &self.completed_lessons
    }

    /// Quiz history in submission order.
    #[must_use]
    pub fn quiz_scores(&self) -> &[QuizResult] {
        &self.quiz_scores
    }

    #[must_use]
    pub fn has_license(&self) -> bool {
        self.has_license
    }

    #[must_use]
    pub fn is_lesson_complete(&self, id: LessonId) -> bool {
        self.completed_lessons.contains(&id)
    }

    /// Add a lesson to the completed set. Returns `false` if it was already there.
    pub fn mark_lesson_complete(&mut self, id: LessonId) -> bool {
        if self.is_lesson_complete(id) {
            return false;
        }
        self.completed_lessons.push(id);
        true
    }

    /// Append a quiz attempt. Repeated attempts are all kept.
    pub fn record_quiz_result(&mut self, result: QuizResult) {
        self.quiz_scores.push(result);
    }

    /// Set the license flag. Returns `false` if it was already set.
    pub fn issue_license(&mut self) -> bool {
        let newly_issued = !self.has_license;
        self.has_license = true;
        newly_issued
    }
}
