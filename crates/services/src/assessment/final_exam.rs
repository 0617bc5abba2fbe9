use std::collections::HashMap;
use std::sync::Arc;

use drive_core::assessor;
use drive_core::model::{ContentCatalog, ExamQuestion};
use tracing::info;

use crate::error::WorkflowError;
use crate::progress_store::ProgressStore;

//
// ─── EXAM SESSION ─────────────────────────────────────────────────────────────
//

/// In-memory state of one final-exam attempt.
///
/// Answers are keyed by question position and can be changed until the
/// session is submitted.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<ExamQuestion>,
    answers: HashMap<usize, usize>,
    current: usize,
}

impl ExamSession {
    #[must_use]
    pub fn new(questions: Vec<ExamQuestion>) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            current: 0,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[ExamQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<usize, usize> {
        &self.answers
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&ExamQuestion> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// True when every question has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Select an option for the question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::QuestionOutOfRange` or
    /// `WorkflowError::InvalidOption` for positions that do not exist.
    pub fn answer(&mut self, index: usize, option: usize) -> Result<(), WorkflowError> {
        let question = self
            .questions
            .get(index)
            .ok_or(WorkflowError::QuestionOutOfRange(index))?;
        if option >= question.options.len() {
            return Err(WorkflowError::InvalidOption {
                question: index,
                option,
            });
        }
        self.answers.insert(index, option);
        Ok(())
    }

    /// Select an option for the current question.
    ///
    /// # Errors
    ///
    /// Same as [`ExamSession::answer`].
    pub fn answer_current(&mut self, option: usize) -> Result<(), WorkflowError> {
        self.answer(self.current, option)
    }

    /// Move to the next question once the current one is answered.
    ///
    /// Returns `false` when the current question is unanswered or this was
    /// the last question.
    pub fn advance(&mut self) -> bool {
        if !self.is_answered(self.current) || self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }
}

//
// ─── WORKFLOW ─────────────────────────────────────────────────────────────────
//

/// Result of a submitted final exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamOutcome {
    pub percent: u8,
    pub passed: bool,
    /// License state after the submission was applied.
    pub has_license: bool,
}

/// Builds final exams and applies their results.
#[derive(Clone)]
pub struct FinalExamWorkflow {
    content: Arc<ContentCatalog>,
    progress: Arc<ProgressStore>,
}

impl FinalExamWorkflow {
    #[must_use]
    pub fn new(content: Arc<ContentCatalog>, progress: Arc<ProgressStore>) -> Self {
        Self { content, progress }
    }

    /// Start an exam if every lesson is complete.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::ExamLocked` while lessons remain.
    pub async fn start(&self) -> Result<ExamSession, WorkflowError> {
        let progress = self.progress.load().await;
        let lessons = self.content.lessons();
        if !assessor::final_exam_unlocked(&progress, lessons) {
            let completed = lessons
                .iter()
                .filter(|lesson| progress.is_lesson_complete(lesson.id))
                .count();
            return Err(WorkflowError::ExamLocked {
                completed,
                total: lessons.len(),
            });
        }
        Ok(self.start_unchecked())
    }

    /// Start an exam without checking lesson completion.
    #[must_use]
    pub fn start_unchecked(&self) -> ExamSession {
        ExamSession::new(assessor::build_final_exam_pool(
            self.content.questions(),
            self.content.lessons(),
        ))
    }

    /// Score a session. Pure; nothing is persisted.
    #[must_use]
    pub fn grade(&self, session: &ExamSession) -> u8 {
        assessor::grade_final_exam(session.questions(), session.answers())
    }

    /// Apply a graded score: a passing score issues the license.
    pub async fn apply_score(&self, percent: u8) -> ExamOutcome {
        let passed = assessor::is_passing(percent);
        let progress = if passed {
            self.progress.issue_license().await
        } else {
            self.progress.load().await
        };
        info!(percent, passed, "final exam submitted");
        ExamOutcome {
            percent,
            passed,
            has_license: progress.has_license(),
        }
    }

    /// Grade the session and apply the result.
    pub async fn submit(&self, session: &ExamSession) -> ExamOutcome {
        let percent = self.grade(session);
        self.apply_score(percent).await
    }
}
