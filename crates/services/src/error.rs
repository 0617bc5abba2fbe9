//! Shared error types for the services crate.

use thiserror::Error;

use drive_core::model::{ContentError, LessonId, ProgressError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by the quiz and exam workflows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error("final exam is locked: {completed} of {total} lessons complete")]
    ExamLocked { completed: usize, total: usize },
    #[error("lesson {0} must be completed through its quiz")]
    QuizRequired(LessonId),
    #[error("question {0} is out of range")]
    QuestionOutOfRange(usize),
    #[error("option {option} is out of range for question {question}")]
    InvalidOption { question: usize, option: usize },
}

/// Errors emitted when producing the license artifact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LicenseError {
    #[error("no license has been issued")]
    NotIssued,
    #[error("license holder name is empty")]
    EmptyHolder,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
