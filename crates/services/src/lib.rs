#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod course_service;
pub mod dashboard_service;
pub mod error;
pub mod flashcard_workflow;
pub mod lesson_service;
pub mod progress_service;
pub mod quiz_workflow;

pub use portal_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthService, SignUpResult};
pub use course_service::{CoursePage, CourseService};
pub use dashboard_service::{DashboardPage, DashboardService};
pub use error::{AuthServiceError, LoadError, WorkflowError};
pub use flashcard_workflow::FlashcardWorkflow;
pub use lesson_service::{LessonPage, LessonService};
pub use progress_service::{PendingWrite, ProgressService, ProgressWrite};
pub use quiz_workflow::{PassListener, QuizAdvance, QuizWorkflow};
