mod common;

use std::collections::{HashMap, HashSet};

use drive_core::model::{LessonId, QuestionId};
use drive_core::time::fixed_clock;
use services::{AppServices, ExamSession, LicenseError, WorkflowError};

async fn complete_all_lessons(app: &AppServices) {
    let lessons = app.lesson_quiz();
    lessons
        .submit(
            LessonId::new(1),
            &HashMap::from([(QuestionId::new(1), 1), (QuestionId::new(2), 0)]),
        )
        .await
        .unwrap();
    lessons
        .submit(LessonId::new(2), &HashMap::from([(QuestionId::new(1), 0)]))
        .await
        .unwrap();
    lessons.complete_reading(LessonId::new(3)).await.unwrap();
}

fn answer_all(session: &mut ExamSession, correct: usize) {
    for index in 0..session.total() {
        let question = &session.questions()[index];
        let option = if index < correct {
            common::correct_option(question)
        } else {
            common::wrong_option(question)
        };
        session.answer(index, option).unwrap();
    }
}

#[tokio::test]
async fn exam_is_locked_until_lessons_are_done() {
    let app = AppServices::new_in_memory(common::catalog(), fixed_clock());
    let err = app.final_exam().start().await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::ExamLocked {
            completed: 0,
            total: 3
        }
    ));

    complete_all_lessons(&app).await;
    assert!(app.dashboard().overview().await.final_exam_unlocked);
    assert!(app.final_exam().start().await.is_ok());
}

#[tokio::test]
async fn small_pool_draws_every_question_once() {
    let app = AppServices::new_in_memory(common::catalog(), fixed_clock());
    // 5 general + 3 lesson questions.
    let session = app.final_exam().start_unchecked();
    assert_eq!(session.total(), 8);
    let ids: HashSet<_> = session.questions().iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn passing_exam_issues_license() {
    let app = AppServices::new_in_memory(common::catalog(), fixed_clock());
    complete_all_lessons(&app).await;

    let exam = app.final_exam();
    let mut session = exam.start().await.unwrap();
    let total = session.total();
    answer_all(&mut session, total);
    assert!(session.is_complete());

    let outcome = exam.submit(&session).await;
    assert_eq!(outcome.percent, 100);
    assert!(outcome.passed);
    assert!(outcome.has_license);

    let license = app.dashboard().driver_license("Alex Driver").await.unwrap();
    assert_eq!(license.holder, "Alex Driver");
}

#[tokio::test]
async fn failing_exam_leaves_license_unissued() {
    let app = AppServices::new_in_memory(common::catalog(), fixed_clock());
    complete_all_lessons(&app).await;

    let exam = app.final_exam();
    let mut session = exam.start().await.unwrap();
    // 6 of 8 correct = 75%.
    answer_all(&mut session, 6);
    let outcome = exam.submit(&session).await;
    assert_eq!(outcome.percent, 75);
    assert!(!outcome.passed);
    assert!(!outcome.has_license);

    assert_eq!(
        app.dashboard().driver_license("Alex Driver").await,
        Err(LicenseError::NotIssued)
    );
}

#[tokio::test]
async fn unanswered_exam_scores_zero() {
    let app = AppServices::new_in_memory(common::catalog(), fixed_clock());
    let exam = app.final_exam();
    let session = exam.start_unchecked();
    assert_eq!(exam.grade(&session), 0);
    assert!(!exam.submit(&session).await.has_license);
}

#[tokio::test]
async fn license_survives_a_later_failed_exam() {
    let app = AppServices::new_in_memory(common::catalog(), fixed_clock());
    let exam = app.final_exam();

    assert!(exam.apply_score(80).await.has_license);
    let outcome = exam.apply_score(10).await;
    assert!(!outcome.passed);
    assert!(outcome.has_license);
}
