use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Lesson, LessonId, Question, QuestionId};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("lesson {0} not found")]
    LessonNotFound(LessonId),

    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: &'static str,
        message: String,
    },

    #[error("duplicate lesson id {0}")]
    DuplicateLesson(LessonId),

    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error("question {0} has no options")]
    NoOptions(QuestionId),

    #[error("answer of question {0} is not one of its options")]
    AnswerNotInOptions(QuestionId),

    #[error("lesson {lesson} question {question}: correct answer {index} is out of range")]
    CorrectAnswerOutOfRange {
        lesson: LessonId,
        question: QuestionId,
        index: usize,
    },

    #[error("lesson {lesson} has duplicate quiz question id {question}")]
    DuplicateLessonQuestion {
        lesson: LessonId,
        question: QuestionId,
    },
}

/// Static lesson catalog plus the general question bank.
///
/// Content is read-only input; nothing here mutates it after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    lessons: Vec<Lesson>,
    questions: Vec<Question>,
}

impl ContentCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if ids collide or a question cannot be graded.
    pub fn new(lessons: Vec<Lesson>, questions: Vec<Question>) -> Result<Self, ContentError> {
        let catalog = Self { lessons, questions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse `lessons.json` and `questions.json` payloads.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` for malformed JSON, or a validation error.
    pub fn from_json(lessons_json: &str, questions_json: &str) -> Result<Self, ContentError> {
        let lessons: Vec<Lesson> =
            serde_json::from_str(lessons_json).map_err(|err| ContentError::Parse {
                source_name: "lessons",
                message: err.to_string(),
            })?;
        let questions: Vec<Question> =
            serde_json::from_str(questions_json).map_err(|err| ContentError::Parse {
                source_name: "questions",
                message: err.to_string(),
            })?;
        Self::new(lessons, questions)
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a lesson by id.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::LessonNotFound` for unknown ids.
    pub fn lesson(&self, id: LessonId) -> Result<&Lesson, ContentError> {
        self.lessons
            .iter()
            .find(|lesson| lesson.id == id)
            .ok_or(ContentError::LessonNotFound(id))
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut lesson_ids = HashSet::new();
        for lesson in &self.lessons {
            if !lesson_ids.insert(lesson.id) {
                return Err(ContentError::DuplicateLesson(lesson.id));
            }

            let mut quiz_ids = HashSet::new();
            for question in &lesson.quiz {
                if !quiz_ids.insert(question.id) {
                    return Err(ContentError::DuplicateLessonQuestion {
                        lesson: lesson.id,
                        question: question.id,
                    });
                }
                if question.options.is_empty() {
                    return Err(ContentError::NoOptions(question.id));
                }
                if question.correct_answer >= question.options.len() {
                    return Err(ContentError::CorrectAnswerOutOfRange {
                        lesson: lesson.id,
                        question: question.id,
                        index: question.correct_answer,
                    });
                }
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id) {
                return Err(ContentError::DuplicateQuestion(question.id));
            }
            if question.options.is_empty() {
                return Err(ContentError::NoOptions(question.id));
            }
            if !question.options.contains(&question.answer) {
                return Err(ContentError::AnswerNotInOptions(question.id));
            }
        }

        Ok(())
    }
}
