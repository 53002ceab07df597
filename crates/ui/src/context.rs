use std::sync::Arc;

use dioxus::prelude::*;
use portal_core::model::{Flashcard, LessonId, QuizQuestion, Viewer};
use services::{
    AppServices, AuthService, CourseService, DashboardService, FlashcardWorkflow, LessonService,
    QuizWorkflow,
};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
    fn link_opener(&self) -> LinkOpenerRef;

    /// Short label for the active backend, shown in the header.
    fn backend_label(&self) -> &'static str;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    link_opener: LinkOpenerRef,
    backend_label: &'static str,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            link_opener: app.link_opener(),
            backend_label: app.backend_label(),
        }
    }

    #[must_use]
    pub fn backend_label(&self) -> &'static str {
        self.backend_label
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    #[must_use]
    pub fn quiz(&self, lesson_id: LessonId, questions: Vec<QuizQuestion>) -> QuizWorkflow {
        self.services.quiz(lesson_id, questions)
    }

    #[must_use]
    pub fn flashcards(&self, lesson_id: LessonId, cards: Vec<Flashcard>) -> FlashcardWorkflow {
        self.services.flashcards(lesson_id, cards)
    }

    pub fn open_url(&self, url: &str) {
        self.link_opener.open_url(url);
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Publishes the current viewer as a signal so loaders re-run on sign in/out.
pub fn use_viewer_provider() -> Signal<Viewer> {
    let ctx = use_context::<AppContext>();
    use_context_provider(move || Signal::new(ctx.auth().viewer()))
}

#[must_use]
pub fn use_viewer() -> Signal<Viewer> {
    use_context::<Signal<Viewer>>()
}
