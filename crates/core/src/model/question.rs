use serde::{Deserialize, Serialize};

use crate::model::{LessonId, PoolQuestionId, QuestionId};

/// A question from the general practice bank, graded by answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    /// Whether the chosen option text matches the canonical answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// A question embedded in a lesson quiz, graded by option index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonQuestion {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl LessonQuestion {
    /// Text of the correct option, if the index is in range.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

//
// ─── EXAM QUESTION ────────────────────────────────────────────────────────────
//

/// How a question in the unified exam pool is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingMode {
    /// The chosen option index must equal this index.
    ByIndex(usize),
    /// The text of the chosen option must equal this answer.
    ByText(String),
}

/// A question normalized into the final-exam pool.
///
/// `answer` always carries display text; for lesson questions it is derived
/// from the correct option. Grading goes through `grading` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamQuestion {
    pub id: PoolQuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub grading: GradingMode,
}

impl ExamQuestion {
    #[must_use]
    pub fn from_general(question: &Question) -> Self {
        Self {
            id: PoolQuestionId::General(question.id),
            question: question.question.clone(),
            options: question.options.clone(),
            answer: question.answer.clone(),
            grading: GradingMode::ByText(question.answer.clone()),
        }
    }

    #[must_use]
    pub fn from_lesson(lesson_id: LessonId, question: &LessonQuestion) -> Self {
        Self {
            id: PoolQuestionId::Lesson(lesson_id, question.id),
            question: question.question.clone(),
            options: question.options.clone(),
            answer: question.correct_option().unwrap_or_default().to_owned(),
            grading: GradingMode::ByIndex(question.correct_answer),
        }
    }

    /// Check a chosen option index. Out-of-range choices are incorrect.
    #[must_use]
    pub fn is_correct(&self, chosen: usize) -> bool {
        match &self.grading {
            GradingMode::ByIndex(index) => chosen == *index,
            GradingMode::ByText(answer) => self
                .options
                .get(chosen)
                .is_some_and(|option| option == answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general() -> Question {
        Question {
            id: QuestionId::new(1),
            question: "What does a red octagon mean?".into(),
            options: vec!["Yield".into(), "Stop".into(), "Merge".into()],
            answer: "Stop".into(),
            image: None,
        }
    }

    fn lesson_question() -> LessonQuestion {
        LessonQuestion {
            id: QuestionId::new(1),
            question: "When may you pass on the right?".into(),
            options: vec!["Never".into(), "When the car ahead turns left".into()],
            correct_answer: 1,
        }
    }

    #[test]
    fn general_question_grades_by_text() {
        let exam = ExamQuestion::from_general(&general());
        assert_eq!(exam.grading, GradingMode::ByText("Stop".into()));
        assert!(exam.is_correct(1));
        assert!(!exam.is_correct(0));
        assert!(!exam.is_correct(9));
    }

    #[test]
    fn lesson_question_grades_by_index_and_derives_answer() {
        let exam = ExamQuestion::from_lesson(LessonId::new(4), &lesson_question());
        assert_eq!(exam.grading, GradingMode::ByIndex(1));
        assert_eq!(exam.answer, "When the car ahead turns left");
        assert_eq!(exam.id.to_string(), "less-4-1");
        assert!(exam.is_correct(1));
        assert!(!exam.is_correct(0));
    }

    #[test]
    fn lesson_question_parses_camel_case() {
        let json = r#"{"id":2,"question":"Q","options":["a","b"],"correctAnswer":0}"#;
        let parsed: LessonQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.correct_answer, 0);
        assert_eq!(parsed.correct_option(), Some("a"));
    }
}
