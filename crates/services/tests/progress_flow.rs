mod common;

use std::collections::HashMap;
use std::sync::Arc;

use drive_core::assessor::QuizVerdict;
use drive_core::model::{LessonId, QuestionId, UserProgress};
use drive_core::time::{fixed_clock, fixed_now};
use services::{AppServices, WorkflowError};
use storage::repository::{InMemoryStore, KeyValueStore, Storage};
use storage::{PROGRESS_KEY, decode_progress};

fn services_with_store() -> (AppServices, InMemoryStore) {
    let kv = InMemoryStore::new();
    let storage = Storage {
        kv: Arc::new(kv.clone()),
    };
    (
        AppServices::from_storage(&storage, common::catalog(), fixed_clock()),
        kv,
    )
}

#[tokio::test]
async fn passing_lesson_quiz_marks_lesson_once() {
    let (app, kv) = services_with_store();
    let workflow = app.lesson_quiz();
    let answers = HashMap::from([(QuestionId::new(1), 1), (QuestionId::new(2), 0)]);

    let first = workflow.submit(LessonId::new(1), &answers).await.unwrap();
    assert_eq!(first.verdict, QuizVerdict::Pass);
    assert!(first.newly_completed);
    let stored_once = kv.get(PROGRESS_KEY).await.unwrap();

    let second = workflow.submit(LessonId::new(1), &answers).await.unwrap();
    assert_eq!(second.verdict, QuizVerdict::Pass);
    assert!(!second.newly_completed);
    assert_eq!(kv.get(PROGRESS_KEY).await.unwrap(), stored_once);

    let opened = workflow.open(LessonId::new(1)).await.unwrap();
    assert!(opened.completed);
}

#[tokio::test]
async fn failing_or_partial_lesson_quiz_changes_nothing() {
    let (app, kv) = services_with_store();
    let workflow = app.lesson_quiz();

    let partial = HashMap::from([(QuestionId::new(1), 1)]);
    assert!(!workflow.ready_to_submit(LessonId::new(1), &partial).unwrap());
    let outcome = workflow.submit(LessonId::new(1), &partial).await.unwrap();
    assert_eq!(outcome.verdict, QuizVerdict::Fail);

    let wrong = HashMap::from([(QuestionId::new(1), 0), (QuestionId::new(2), 0)]);
    assert!(workflow.ready_to_submit(LessonId::new(1), &wrong).unwrap());
    let outcome = workflow.submit(LessonId::new(1), &wrong).await.unwrap();
    assert_eq!(outcome.verdict, QuizVerdict::Fail);
    assert!(!outcome.newly_completed);

    assert_eq!(kv.get(PROGRESS_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn unknown_lesson_is_reported_as_not_found() {
    let (app, _) = services_with_store();
    let err = app.lesson_quiz().open(LessonId::new(404)).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Content(_)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn reading_only_lessons_complete_without_quiz() {
    let (app, _) = services_with_store();
    let workflow = app.lesson_quiz();

    assert!(workflow.complete_reading(LessonId::new(3)).await.unwrap());
    assert!(matches!(
        workflow.complete_reading(LessonId::new(1)).await,
        Err(WorkflowError::QuizRequired(_))
    ));
    let outcome = workflow
        .submit(LessonId::new(3), &HashMap::new())
        .await
        .unwrap();
    assert_eq!(outcome.verdict, QuizVerdict::Fail);
}

#[tokio::test]
async fn practice_quiz_records_every_attempt() {
    let (app, kv) = services_with_store();
    let quiz = app.practice_quiz();

    assert!(quiz.check(0, "No passing").unwrap());
    assert!(!quiz.check(0, "Passing allowed").unwrap());
    assert!(quiz.check(99, "x").is_err());

    let all_right: Vec<String> = quiz.questions().iter().map(|q| q.answer.clone()).collect();
    let result = quiz.finish(&all_right).await.unwrap();
    assert_eq!((result.score(), result.total()), (5, 5));
    assert!(result.passed());
    assert_eq!(result.date(), fixed_now());

    let mut mostly_wrong = all_right.clone();
    mostly_wrong.truncate(3);
    let result = quiz.finish(&mostly_wrong).await.unwrap();
    assert_eq!((result.score(), result.total()), (3, 5));
    assert!(!result.passed());

    let raw = kv.get(PROGRESS_KEY).await.unwrap().unwrap();
    let stored = decode_progress(&raw).unwrap();
    assert_eq!(stored.quiz_scores().len(), 2);

    let overview = app.dashboard().overview().await;
    assert_eq!(overview.quizzes_taken, 2);
    assert_eq!(overview.average_quiz_score, 80);
}

#[tokio::test]
async fn overview_tracks_completion() {
    let (app, _) = services_with_store();
    let dashboard = app.dashboard();

    let empty = dashboard.overview().await;
    assert_eq!(empty.completion_percent, 0);
    assert_eq!(empty.average_quiz_score, 0);
    assert!(!empty.final_exam_unlocked);

    app.lesson_quiz()
        .complete_reading(LessonId::new(3))
        .await
        .unwrap();
    let overview = dashboard.overview().await;
    assert_eq!(overview.completed_lessons, 1);
    assert_eq!(overview.total_lessons, 3);
    assert_eq!(overview.completion_percent, 33);

    let json = serde_json::to_value(&overview).unwrap();
    assert_eq!(json["completion_percent"], 33);
}

#[tokio::test]
async fn reset_discards_all_history() {
    let (app, _) = services_with_store();
    let progress = app.progress();
    progress.mark_lesson_complete(LessonId::new(1)).await;
    progress.issue_license().await;

    progress.reset().await;
    assert_eq!(progress.load().await, UserProgress::default());
    assert!(!app.dashboard().overview().await.has_license);
}

#[tokio::test]
async fn malformed_record_reads_as_empty() {
    let (app, kv) = services_with_store();
    kv.set(PROGRESS_KEY, "[1, 2, 3]").await.unwrap();
    assert_eq!(app.progress().load().await, UserProgress::default());

    // The next mutation overwrites the bad value with a valid record.
    app.progress().mark_lesson_complete(LessonId::new(2)).await;
    let raw = kv.get(PROGRESS_KEY).await.unwrap().unwrap();
    assert_eq!(
        decode_progress(&raw).unwrap().completed_lessons(),
        &[LessonId::new(2)]
    );
}
