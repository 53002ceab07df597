use dioxus::prelude::*;
use dioxus_router::Link;
use portal_core::model::CourseId;

use crate::context::{AppContext, use_viewer};
use crate::routes::Route;
use crate::views::{
    LoadErrorBanner, NotFoundPanel, ViewError, ViewState, view_state_from_resource,
};
use crate::vm::{CourseVm, LessonCardVm, map_course};

#[component]
pub fn CourseView(course_id: String) -> Element {
    match course_id.parse::<CourseId>() {
        Ok(course_id) => rsx! {
            CoursePage { key: "{course_id}", course_id }
        },
        Err(_) => rsx! {
            NotFoundPanel { title: "Course not found" }
        },
    }
}

#[component]
fn CoursePage(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let viewer = use_viewer();
    let courses = ctx.courses();

    let resource = use_resource(move || {
        let courses = courses.clone();
        let viewer = viewer();
        async move {
            let page = courses
                .load(course_id, viewer)
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_course(&page, viewer))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page course",
            Link { class: "back-link", to: Route::Dashboard {}, "← All courses" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::NotFound) => rsx! {
                    NotFoundPanel { title: "Course not found" }
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
                ViewState::Ready(data) => rsx! {
                    CourseBody { data }
                },
            }
        }
    }
}

#[component]
fn CourseBody(data: CourseVm) -> Element {
    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{data.title}" }
            if let Some(description) = data.description {
                p { class: "view-subtitle", "{description}" }
            }
        }
        if let Some(progress) = data.progress {
            div { class: "course-progress",
                p { class: "progress-label", "{progress.label} completed" }
                div { class: "progress",
                    div { class: "progress-fill", style: "width: {progress.percent}%" }
                }
            }
        }
        if data.lessons.is_empty() {
            p { class: "empty", "This course has no lessons yet." }
        } else {
            ol { class: "lesson-list",
                for lesson in data.lessons {
                    LessonCard { key: "{lesson.id}", lesson }
                }
            }
        }
    }
}

#[component]
fn LessonCard(lesson: LessonCardVm) -> Element {
    let class = if lesson.completed {
        "lesson-card completed"
    } else {
        "lesson-card"
    };
    rsx! {
        li { class,
            span { class: "lesson-order", "{lesson.order_label}" }
            div { class: "lesson-body",
                h3 { "{lesson.title}" }
                if let Some(summary) = lesson.summary {
                    p { class: "lesson-summary", "{summary}" }
                }
                p { class: "lesson-meta",
                    span { "{lesson.duration_label}" }
                    span { "{lesson.kind_label}" }
                    if lesson.completed {
                        span { class: "lesson-done", "✓ Completed" }
                    }
                }
            }
            Link {
                class: "btn btn-primary",
                to: Route::Lesson { lesson_id: lesson.id.to_string() },
                "{lesson.cta_label}"
            }
        }
    }
}
