use std::collections::HashMap;
use std::sync::Arc;

use drive_core::assessor::{self, QuizVerdict};
use drive_core::model::{ContentCatalog, Lesson, LessonId, QuestionId};
use tracing::debug;

use crate::error::WorkflowError;
use crate::progress_store::ProgressStore;

/// A lesson as shown to the learner, with its completion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedLesson {
    pub lesson: Lesson,
    pub completed: bool,
}

/// Result of submitting a lesson quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonQuizOutcome {
    pub verdict: QuizVerdict,
    /// True only when this submission moved the lesson into the completed set.
    pub newly_completed: bool,
}

/// Opens lessons and gates their completion behind the embedded quiz.
#[derive(Clone)]
pub struct LessonQuizWorkflow {
    content: Arc<ContentCatalog>,
    progress: Arc<ProgressStore>,
}

impl LessonQuizWorkflow {
    #[must_use]
    pub fn new(content: Arc<ContentCatalog>, progress: Arc<ProgressStore>) -> Self {
        Self { content, progress }
    }

    /// Look up a lesson and whether it is already complete.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Content` when the lesson id is unknown.
    pub async fn open(&self, lesson_id: LessonId) -> Result<OpenedLesson, WorkflowError> {
        let lesson = self.content.lesson(lesson_id)?.clone();
        let completed = self.progress.load().await.is_lesson_complete(lesson_id);
        Ok(OpenedLesson { lesson, completed })
    }

    /// Whether every quiz question has an answer selected.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Content` when the lesson id is unknown.
    pub fn ready_to_submit(
        &self,
        lesson_id: LessonId,
        answers: &HashMap<QuestionId, usize>,
    ) -> Result<bool, WorkflowError> {
        let lesson = self.content.lesson(lesson_id)?;
        Ok(lesson.has_quiz() && assessor::lesson_quiz_ready(&lesson.quiz, answers))
    }

    /// Grade the lesson quiz and mark the lesson complete on a pass.
    ///
    /// Lessons without a quiz always fail here; they complete through
    /// [`LessonQuizWorkflow::complete_reading`].
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Content` when the lesson id is unknown.
    pub async fn submit(
        &self,
        lesson_id: LessonId,
        answers: &HashMap<QuestionId, usize>,
    ) -> Result<LessonQuizOutcome, WorkflowError> {
        let lesson = self.content.lesson(lesson_id)?;
        if !lesson.has_quiz() {
            return Ok(LessonQuizOutcome {
                verdict: QuizVerdict::Fail,
                newly_completed: false,
            });
        }

        let verdict = assessor::grade_lesson_quiz(&lesson.quiz, answers);
        debug!(lesson = %lesson_id, ?verdict, "lesson quiz graded");
        if !verdict.is_pass() {
            return Ok(LessonQuizOutcome {
                verdict,
                newly_completed: false,
            });
        }

        let already = self.progress.load().await.is_lesson_complete(lesson_id);
        let after = self.progress.mark_lesson_complete(lesson_id).await;
        Ok(LessonQuizOutcome {
            verdict,
            newly_completed: !already && after.is_lesson_complete(lesson_id),
        })
    }

    /// Mark a lesson that has no quiz as complete.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::QuizRequired` if the lesson has a quiz, or
    /// `WorkflowError::Content` when the lesson id is unknown.
    pub async fn complete_reading(&self, lesson_id: LessonId) -> Result<bool, WorkflowError> {
        let lesson = self.content.lesson(lesson_id)?;
        if lesson.has_quiz() {
            return Err(WorkflowError::QuizRequired(lesson_id));
        }
        Ok(self
            .progress
            .mark_lesson_complete(lesson_id)
            .await
            .is_lesson_complete(lesson_id))
    }
}
