use std::sync::Arc;

use drive_core::model::ContentCatalog;
use storage::repository::Storage;

use crate::Clock;
use crate::assessment::{
    DashboardService, FinalExamWorkflow, LessonQuizWorkflow, PracticeQuizWorkflow,
};
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;

/// Assembles app-facing services over one storage backend and one catalog.
#[derive(Clone)]
pub struct AppServices {
    content: Arc<ContentCatalog>,
    progress: Arc<ProgressStore>,
    lesson_quiz: Arc<LessonQuizWorkflow>,
    practice_quiz: Arc<PracticeQuizWorkflow>,
    final_exam: Arc<FinalExamWorkflow>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalog: ContentCatalog,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, catalog, clock))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn new_in_memory(catalog: ContentCatalog, clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), catalog, clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, catalog: ContentCatalog, clock: Clock) -> Self {
        let content = Arc::new(catalog);
        let progress = Arc::new(ProgressStore::new(Arc::clone(&storage.kv)));

        let lesson_quiz = Arc::new(LessonQuizWorkflow::new(
            Arc::clone(&content),
            Arc::clone(&progress),
        ));
        let practice_quiz = Arc::new(PracticeQuizWorkflow::new(
            clock,
            Arc::clone(&content),
            Arc::clone(&progress),
        ));
        let final_exam = Arc::new(FinalExamWorkflow::new(
            Arc::clone(&content),
            Arc::clone(&progress),
        ));
        let dashboard = Arc::new(DashboardService::new(
            clock,
            Arc::clone(&content),
            Arc::clone(&progress),
        ));

        Self {
            content,
            progress,
            lesson_quiz,
            practice_quiz,
            final_exam,
            dashboard,
        }
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentCatalog> {
        Arc::clone(&self.content)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn lesson_quiz(&self) -> Arc<LessonQuizWorkflow> {
        Arc::clone(&self.lesson_quiz)
    }

    #[must_use]
    pub fn practice_quiz(&self) -> Arc<PracticeQuizWorkflow> {
        Arc::clone(&self.practice_quiz)
    }

    #[must_use]
    pub fn final_exam(&self) -> Arc<FinalExamWorkflow> {
        Arc::clone(&self.final_exam)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}
