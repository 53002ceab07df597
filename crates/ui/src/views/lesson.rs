use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use portal_core::model::LessonId;
use portal_core::quiz::QuizOutcome;
use services::LessonPage;

use crate::context::{AppContext, use_viewer};
use crate::routes::Route;
use crate::views::{
    FlashcardsPanel, LoadErrorBanner, NotFoundPanel, QuizPanel, VideoPanel, ViewError, ViewState,
    view_state_from_resource,
};
use crate::vm::format_date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LessonTab {
    Video,
    Flashcards,
    Quiz,
}

#[component]
pub fn LessonView(lesson_id: String) -> Element {
    match lesson_id.parse::<LessonId>() {
        Ok(lesson_id) => rsx! {
            LessonScreen { key: "{lesson_id}", lesson_id }
        },
        Err(_) => rsx! {
            NotFoundPanel { title: "Lesson not found" }
        },
    }
}

#[component]
fn LessonScreen(lesson_id: LessonId) -> Element {
    let ctx = use_context::<AppContext>();
    let viewer = use_viewer();
    let lessons = ctx.lessons();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        let viewer = viewer();
        async move {
            lessons
                .load(lesson_id, viewer)
                .await
                .map_err(ViewError::from)
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page lesson",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::NotFound) => rsx! {
                    NotFoundPanel { title: "Lesson not found" }
                },
                ViewState::Error(error) => rsx! {
                    LoadErrorBanner {
                        error,
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(page) => rsx! {
                    LessonBody { page }
                },
            }
        }
    }
}

#[component]
fn LessonBody(page: LessonPage) -> Element {
    let navigator = use_navigator();
    let mut tab = use_signal(|| LessonTab::Video);
    let mut passed_now = use_signal(|| false);

    let completed = page.is_completed() || passed_now();
    let course_id = page.course.id.to_string();
    let last_studied = page
        .progress
        .as_ref()
        .and_then(|row| row.last_reviewed_at)
        .map(format_date);
    let tab_class = move |this: LessonTab| {
        if tab() == this { "tab active" } else { "tab" }
    };
    let on_passed = move |_: QuizOutcome| passed_now.set(true);

    rsx! {
        button {
            class: "back-link",
            r#type: "button",
            onclick: move |_| {
                navigator.push(Route::Course { course_id: course_id.clone() });
            },
            "← {page.course.title}"
        }
        header { class: "view-header",
            span { class: "lesson-order", "Lesson {page.lesson.order_number}" }
            h2 { class: "view-title", "{page.lesson.title}" }
            if let Some(summary) = page.lesson.summary.clone() {
                p { class: "view-subtitle", "{summary}" }
            }
            if completed {
                span { class: "badge badge-success", "✓ Completed" }
            }
            if let Some(date) = last_studied {
                span { class: "muted", "Last studied {date}" }
            }
        }
        nav { class: "tabs", role: "tablist",
            button {
                class: tab_class(LessonTab::Video),
                r#type: "button",
                onclick: move |_| tab.set(LessonTab::Video),
                "Video"
            }
            button {
                class: tab_class(LessonTab::Flashcards),
                r#type: "button",
                onclick: move |_| tab.set(LessonTab::Flashcards),
                "Flashcards ({page.flashcards.len()})"
            }
            button {
                class: tab_class(LessonTab::Quiz),
                r#type: "button",
                onclick: move |_| tab.set(LessonTab::Quiz),
                "Quiz ({page.questions.len()})"
            }
        }
        section { class: "tab-panel",
            match tab() {
                LessonTab::Video => rsx! {
                    VideoPanel { source: page.video.clone(), title: page.lesson.title.clone() }
                },
                LessonTab::Flashcards => rsx! {
                    FlashcardsPanel { lesson_id: page.lesson.id, cards: page.flashcards.clone() }
                },
                LessonTab::Quiz => rsx! {
                    QuizPanel {
                        lesson_id: page.lesson.id,
                        questions: page.questions.clone(),
                        on_passed,
                    }
                },
            }
        }
        nav { class: "lesson-nav",
            if let Some(previous) = page.previous.clone() {
                Link {
                    class: "btn btn-secondary",
                    to: Route::Lesson { lesson_id: previous.id.to_string() },
                    "← {previous.title}"
                }
            }
            if let Some(next) = page.next.clone() {
                Link {
                    class: "btn btn-primary",
                    to: Route::Lesson { lesson_id: next.id.to_string() },
                    "{next.title} →"
                }
            }
        }
    }
}
