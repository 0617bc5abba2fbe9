use std::sync::Arc;

use drive_core::Clock;
use drive_core::assessor;
use drive_core::model::{ContentCatalog, Question, QuizResult};

use crate::error::WorkflowError;
use crate::progress_store::ProgressStore;

/// Runs the scored practice quiz over the general question bank.
#[derive(Clone)]
pub struct PracticeQuizWorkflow {
    clock: Clock,
    content: Arc<ContentCatalog>,
    progress: Arc<ProgressStore>,
}

impl PracticeQuizWorkflow {
    #[must_use]
    pub fn new(clock: Clock, content: Arc<ContentCatalog>, progress: Arc<ProgressStore>) -> Self {
        Self {
            clock,
            content,
            progress,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.content.questions()
    }

    /// Immediate feedback for one answer.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::QuestionOutOfRange` for an unknown position.
    pub fn check(&self, index: usize, option: &str) -> Result<bool, WorkflowError> {
        self.content
            .questions()
            .get(index)
            .map(|question| question.is_correct(option))
            .ok_or(WorkflowError::QuestionOutOfRange(index))
    }

    /// Grade a full submission and append it to the quiz history.
    ///
    /// `answers` are the chosen option texts in question order.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Progress` if the question bank is empty.
    pub async fn finish(&self, answers: &[String]) -> Result<QuizResult, WorkflowError> {
        let score = assessor::grade_standalone_quiz(self.content.questions(), answers);
        let result = QuizResult::new(self.clock.now(), score.score, score.total)?;
        self.progress.record_quiz_result(result.clone()).await;
        Ok(result)
    }
}
