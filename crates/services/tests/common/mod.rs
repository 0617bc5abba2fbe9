#![allow(dead_code)]

use drive_core::model::{ContentCatalog, ExamQuestion, GradingMode};

pub const LESSONS: &str = r#"[
    {"id": 1, "category": "Signs", "title": "Regulatory Signs", "duration": "10 min",
     "description": "Stop, yield, and speed signs.",
     "quiz": [
        {"id": 1, "question": "A red octagon means?", "options": ["Yield", "Stop"], "correctAnswer": 1},
        {"id": 2, "question": "A downward triangle means?", "options": ["Yield", "Merge"], "correctAnswer": 0}
     ]},
    {"id": 2, "category": "Rules", "title": "Right of Way", "duration": "8 min",
     "description": "Who goes first.",
     "quiz": [
        {"id": 1, "question": "At a four-way stop, who goes first?", "options": ["First to arrive", "Largest vehicle"], "correctAnswer": 0}
     ]},
    {"id": 3, "category": "Intro", "title": "Welcome", "duration": "2 min",
     "description": "How this course works."}
]"#;

pub const QUESTIONS: &str = r#"[
    {"id": 1, "question": "Solid yellow line on your side means?", "options": ["No passing", "Passing allowed"], "answer": "No passing"},
    {"id": 2, "question": "Flashing red light means?", "options": ["Stop then go", "Slow down"], "answer": "Stop then go"},
    {"id": 3, "question": "Hand signal with arm up means?", "options": ["Left turn", "Right turn"], "answer": "Right turn"},
    {"id": 4, "question": "Following distance in good weather?", "options": ["1 second", "3 seconds"], "answer": "3 seconds"},
    {"id": 5, "question": "School bus with flashing red lights?", "options": ["Stop", "Pass slowly"], "answer": "Stop"}
]"#;

pub fn catalog() -> ContentCatalog {
    ContentCatalog::from_json(LESSONS, QUESTIONS).expect("valid test content")
}

pub fn correct_option(question: &ExamQuestion) -> usize {
    match &question.grading {
        GradingMode::ByIndex(index) => *index,
        GradingMode::ByText(answer) => question
            .options
            .iter()
            .position(|option| option == answer)
            .expect("answer among options"),
    }
}

pub fn wrong_option(question: &ExamQuestion) -> usize {
    (correct_option(question) + 1) % question.options.len()
}
