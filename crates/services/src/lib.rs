#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment;
pub mod error;
pub mod license;
pub mod progress_store;

pub use drive_core::Clock;

pub use app_services::AppServices;
pub use assessment::{
    DashboardService, ExamOutcome, ExamSession, FinalExamWorkflow, LessonQuizOutcome,
    LessonQuizWorkflow, OpenedLesson, PracticeQuizWorkflow, ProgressOverview,
};
pub use error::{AppServicesError, LicenseError, WorkflowError};
pub use license::DriverLicense;
pub use progress_store::ProgressStore;
