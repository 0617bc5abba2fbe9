use std::sync::Arc;

use drive_core::Clock;
use drive_core::assessor;
use drive_core::model::ContentCatalog;
use serde::Serialize;

use crate::error::LicenseError;
use crate::license::DriverLicense;
use crate::progress_store::ProgressStore;

/// Aggregated view of learner progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressOverview {
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub completion_percent: u8,
    pub average_quiz_score: u8,
    pub quizzes_taken: usize,
    pub has_license: bool,
    pub final_exam_unlocked: bool,
}

/// Read-only queries over progress and content.
#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    content: Arc<ContentCatalog>,
    progress: Arc<ProgressStore>,
}

impl DashboardService {
    #[must_use]
    pub fn new(clock: Clock, content: Arc<ContentCatalog>, progress: Arc<ProgressStore>) -> Self {
        Self {
            clock,
            content,
            progress,
        }
    }

    pub async fn overview(&self) -> ProgressOverview {
        let progress = self.progress.load().await;
        let lessons = self.content.lessons();
        ProgressOverview {
            completed_lessons: lessons
                .iter()
                .filter(|lesson| progress.is_lesson_complete(lesson.id))
                .count(),
            total_lessons: lessons.len(),
            completion_percent: assessor::completion_percentage(&progress, lessons),
            average_quiz_score: assessor::average_quiz_score(&progress),
            quizzes_taken: progress.quiz_scores().len(),
            has_license: progress.has_license(),
            final_exam_unlocked: assessor::final_exam_unlocked(&progress, lessons),
        }
    }

    /// The license card, dated today.
    ///
    /// # Errors
    ///
    /// Returns `LicenseError` if no license was issued or the name is blank.
    pub async fn driver_license(&self, holder: &str) -> Result<DriverLicense, LicenseError> {
        let progress = self.progress.load().await;
        DriverLicense::for_progress(&progress, holder, self.clock.now().date_naive())
    }
}
