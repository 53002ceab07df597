use std::sync::Arc;

use portal_core::model::{Flashcard, LessonId, QuizQuestion};
use storage::{Storage, StorageError, SupabaseConfig};

use crate::Clock;
use crate::auth_service::AuthService;
use crate::course_service::CourseService;
use crate::dashboard_service::DashboardService;
use crate::flashcard_workflow::FlashcardWorkflow;
use crate::lesson_service::LessonService;
use crate::progress_service::ProgressService;
use crate::quiz_workflow::QuizWorkflow;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    dashboard: Arc<DashboardService>,
    courses: Arc<CourseService>,
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: Storage, clock: Clock) -> Self {
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
            Arc::clone(&storage.profiles),
        ));
        let courses = Arc::new(CourseService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
            Arc::clone(&storage.profiles),
        ));
        let lessons = Arc::new(LessonService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
        ));
        let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress)));
        let auth = Arc::new(AuthService::new(Arc::clone(&storage.auth)));

        Self {
            dashboard,
            courses,
            lessons,
            progress,
            auth,
        }
    }

    /// Services backed by the bundled demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the demo catalog cannot be loaded.
    pub fn demo(clock: Clock) -> Result<Self, StorageError> {
        Ok(Self::new(Storage::demo()?, clock))
    }

    /// Services backed by a hosted project.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the HTTP client cannot be created.
    pub fn supabase(config: SupabaseConfig, clock: Clock) -> Result<Self, StorageError> {
        Ok(Self::new(Storage::supabase(config)?, clock))
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    /// A fresh quiz for the current viewer.
    #[must_use]
    pub fn quiz(&self, lesson_id: LessonId, questions: Vec<QuizQuestion>) -> QuizWorkflow {
        QuizWorkflow::new(self.progress(), lesson_id, self.auth.viewer(), questions)
    }

    /// A fresh flashcard deck for the current viewer.
    #[must_use]
    pub fn flashcards(&self, lesson_id: LessonId, cards: Vec<Flashcard>) -> FlashcardWorkflow {
        FlashcardWorkflow::new(self.progress(), lesson_id, self.auth.viewer(), cards)
    }
}
