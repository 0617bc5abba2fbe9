use serde::{Deserialize, Serialize};

use crate::model::{LessonId, LessonQuestion};

/// One block of structured lesson content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph { content: String },
    Heading { content: String },
    List { content: Vec<String> },
    Image {
        src: String,
        #[serde(default)]
        caption: String,
    },
    Alert { content: String },
}

/// A lesson in the catalog, optionally with body content and a gating quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub category: String,
    pub title: String,
    pub duration: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub full_content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quiz: Vec<LessonQuestion>,
}

impl Lesson {
    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.quiz.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lesson_with_blocks_and_quiz() {
        let json = r#"{
            "id": 1,
            "category": "Basics",
            "title": "Road Signs",
            "duration": "10 min",
            "description": "Shapes and colors",
            "fullContent": [
                {"type": "heading", "content": "Shapes"},
                {"type": "list", "content": ["Octagon", "Triangle"]},
                {"type": "image", "src": "/img/stop.png", "caption": "Stop sign"},
                {"type": "alert", "content": "Always stop fully."}
            ],
            "quiz": [
                {"id": 1, "question": "Q", "options": ["a", "b"], "correctAnswer": 1}
            ]
        }"#;

        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.id, LessonId::new(1));
        assert_eq!(lesson.full_content.len(), 4);
        assert!(matches!(
            lesson.full_content[1],
            ContentBlock::List { ref content } if content.len() == 2
        ));
        assert!(lesson.has_quiz());
    }

    #[test]
    fn content_and_quiz_are_optional() {
        let json = r#"{"id": 2, "category": "C", "title": "T", "duration": "5 min", "description": "D"}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert!(lesson.full_content.is_empty());
        assert!(!lesson.has_quiz());
    }
}
