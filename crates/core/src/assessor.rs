//! Pure scoring and eligibility rules.
//!
//! Nothing in here touches storage. Callers feed in content and answers,
//! read back scores, and decide themselves what to persist.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{
    ExamQuestion, Lesson, LessonId, LessonQuestion, PASSING_PERCENT, Question, QuestionId,
    UserProgress,
};

/// Number of questions drawn for a final exam.
pub const FINAL_EXAM_SIZE: usize = 10;

//
// ─── RESULT TYPES ─────────────────────────────────────────────────────────────
//

/// Outcome of an all-or-nothing lesson quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizVerdict {
    Pass,
    Fail,
}

impl QuizVerdict {
    #[must_use]
    pub fn is_pass(self) -> bool {
        matches!(self, QuizVerdict::Pass)
    }
}

/// Raw score of a practice quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: u32,
    pub total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percent(u64::from(self.score), u64::from(self.total))
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        is_passing(self.percentage())
    }
}

//
// ─── PERCENTAGES ──────────────────────────────────────────────────────────────
//

/// `round(100 * part / whole)` with halves rounded up. Zero when `whole` is zero.
#[must_use]
pub fn percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    let rounded = (200 * part + whole) / (2 * whole);
    u8::try_from(rounded).unwrap_or(100)
}

/// Whether a percentage meets the pass mark.
#[must_use]
pub fn is_passing(percent: u8) -> bool {
    u32::from(percent) >= PASSING_PERCENT
}

/// Share of catalog lessons the learner has completed, 0..=100.
///
/// Completed ids that are no longer in the catalog do not count.
#[must_use]
pub fn completion_percentage(progress: &UserProgress, lessons: &[Lesson]) -> u8 {
    let catalog: HashSet<LessonId> = lessons.iter().map(|lesson| lesson.id).collect();
    let completed = progress
        .completed_lessons()
        .iter()
        .filter(|id| catalog.contains(id))
        .count();
    percent(completed as u64, catalog.len() as u64)
}

/// Mean of the rounded per-attempt percentages, 0 with no history.
#[must_use]
pub fn average_quiz_score(progress: &UserProgress) -> u8 {
    let scores = progress.quiz_scores();
    if scores.is_empty() {
        return 0;
    }
    let sum: u64 = scores
        .iter()
        .map(|result| u64::from(percent(u64::from(result.score()), u64::from(result.total()))))
        .sum();
    percent(sum, scores.len() as u64 * 100)
}

/// The final exam opens once every catalog lesson is complete.
///
/// An empty catalog keeps it locked.
#[must_use]
pub fn final_exam_unlocked(progress: &UserProgress, lessons: &[Lesson]) -> bool {
    !lessons.is_empty()
        && lessons
            .iter()
            .all(|lesson| progress.is_lesson_complete(lesson.id))
}

//
// ─── LESSON QUIZ ──────────────────────────────────────────────────────────────
//

/// Every question must be answered with its exact `correct_answer` index.
#[must_use]
pub fn grade_lesson_quiz(
    quiz: &[LessonQuestion],
    answers: &HashMap<QuestionId, usize>,
) -> QuizVerdict {
    let all_correct = quiz
        .iter()
        .all(|question| answers.get(&question.id) == Some(&question.correct_answer));
    if all_correct {
        QuizVerdict::Pass
    } else {
        QuizVerdict::Fail
    }
}

/// True once every question in the quiz has some answer selected.
#[must_use]
pub fn lesson_quiz_ready(quiz: &[LessonQuestion], answers: &HashMap<QuestionId, usize>) -> bool {
    quiz.iter().all(|question| answers.contains_key(&question.id))
}

//
// ─── PRACTICE QUIZ ────────────────────────────────────────────────────────────
//

/// Score the general bank against chosen option texts, position by position.
///
/// Missing trailing answers count as wrong; extra answers are ignored.
#[must_use]
pub fn grade_standalone_quiz(questions: &[Question], answers: &[String]) -> QuizScore {
    let score = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(answer))
        .count();
    QuizScore {
        score: u32::try_from(score).unwrap_or(u32::MAX),
        total: u32::try_from(questions.len()).unwrap_or(u32::MAX),
    }
}

//
// ─── FINAL EXAM ───────────────────────────────────────────────────────────────
//

/// Draw a fresh random exam from the general bank and every lesson quiz.
#[must_use]
pub fn build_final_exam_pool(questions: &[Question], lessons: &[Lesson]) -> Vec<ExamQuestion> {
    let mut rng = rand::rng();
    build_final_exam_pool_with(&mut rng, questions, lessons)
}

/// Same as [`build_final_exam_pool`] with a caller-supplied RNG.
///
/// Shuffles the whole pool (Fisher-Yates) and keeps the first
/// [`FINAL_EXAM_SIZE`] entries, or all of them if there are fewer.
pub fn build_final_exam_pool_with<R: Rng + ?Sized>(
    rng: &mut R,
    questions: &[Question],
    lessons: &[Lesson],
) -> Vec<ExamQuestion> {
    let mut pool: Vec<ExamQuestion> = questions.iter().map(ExamQuestion::from_general).collect();
    for lesson in lessons {
        pool.extend(
            lesson
                .quiz
                .iter()
                .map(|question| ExamQuestion::from_lesson(lesson.id, question)),
        );
    }

    pool.shuffle(rng);
    pool.truncate(FINAL_EXAM_SIZE);
    pool
}

/// Percentage of exam questions answered correctly.
///
/// `answers` maps question position to chosen option index. Unanswered
/// questions are wrong; an empty exam scores 0.
#[must_use]
pub fn grade_final_exam(pool: &[ExamQuestion], answers: &HashMap<usize, usize>) -> u8 {
    let correct = pool
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .get(index)
                .is_some_and(|chosen| question.is_correct(*chosen))
        })
        .count();
    percent(correct as u64, pool.len() as u64)
}
