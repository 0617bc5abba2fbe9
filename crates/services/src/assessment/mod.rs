mod dashboard;
mod final_exam;
mod lesson_quiz;
mod practice_quiz;

// Public API of the assessment subsystem.
pub use crate::error::WorkflowError;
pub use dashboard::{DashboardService, ProgressOverview};
pub use final_exam::{ExamOutcome, ExamSession, FinalExamWorkflow};
pub use lesson_quiz::{LessonQuizOutcome, LessonQuizWorkflow, OpenedLesson};
pub use practice_quiz::PracticeQuizWorkflow;
