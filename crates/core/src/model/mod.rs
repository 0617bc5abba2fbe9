mod catalog;
mod ids;
mod lesson;
mod progress;
mod question;

pub use catalog::{ContentCatalog, ContentError};
pub use ids::{LessonId, ParseIdError, PoolQuestionId, QuestionId};
pub use lesson::{ContentBlock, Lesson};
pub use progress::{PASSING_PERCENT, ProgressError, QuizResult, UserProgress};
pub use question::{ExamQuestion, GradingMode, LessonQuestion, Question};
