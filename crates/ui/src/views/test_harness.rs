use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use portal_core::model::{Flashcard, LessonId, QuizQuestion};
use portal_core::quiz::QuizOutcome;
use portal_core::time::fixed_now;
use portal_core::video::VideoSource;
use services::{AppServices, Clock};
use storage::Storage;

use crate::context::{UiApp, build_app_context, use_viewer_provider};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::{
    AuthView, CourseView, DashboardView, FlashcardsPanel, LessonView, NotFoundView, QuizPanel,
    VideoPanel,
};

#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl UiLinkOpener for RecordingOpener {
    fn open_url(&self, url: &str) {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    opener: Arc<RecordingOpener>,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        self.opener.clone()
    }

    fn backend_label(&self) -> &'static str {
        "test"
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Dashboard,
    Course(String),
    Lesson(String),
    Auth,
    NotFound,
    Quiz(LessonId, Vec<QuizQuestion>),
    Flashcards(LessonId, Vec<Flashcard>),
    Video(VideoSource),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_viewer_provider();
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Course(course_id) => rsx! { CourseView { course_id } },
        ViewKind::Lesson(lesson_id) => rsx! { LessonView { lesson_id } },
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::NotFound => rsx! { NotFoundView { segments: vec!["missing".to_string()] } },
        ViewKind::Quiz(lesson_id, questions) => rsx! {
            QuizPanel { lesson_id, questions, on_passed: |_: QuizOutcome| {} }
        },
        ViewKind::Flashcards(lesson_id, cards) => rsx! { FlashcardsPanel { lesson_id, cards } },
        ViewKind::Video(source) => rsx! { VideoPanel { source, title: "Intro" } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending loaders finish.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn demo_services() -> AppServices {
    AppServices::demo(Clock::fixed(fixed_now())).expect("demo catalog")
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(view, demo_services())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    setup_view_harness_with(view, AppServices::new(storage, Clock::fixed(fixed_now())))
}

pub fn setup_view_harness_with(view: ViewKind, services: AppServices) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
        opener: Arc::new(RecordingOpener::default()),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}
