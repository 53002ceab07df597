use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, use_viewer};
use crate::routes::Route;
use crate::views::{LoadErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, DashboardVm, StatsVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let viewer = use_viewer();
    let dashboard = ctx.dashboard();

    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        let viewer = viewer();
        async move {
            let page = dashboard.load(viewer).await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_dashboard(&page, viewer))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
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
                    DashboardBody { data }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(data: DashboardVm) -> Element {
    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{data.greeting}" }
            if data.stats.is_none() {
                p { class: "view-subtitle",
                    "Sign in to track your progress, streaks and badges."
                }
            }
        }
        if let Some(stats) = data.stats {
            StatsRow { stats }
        }
        if data.courses.is_empty() {
            p { class: "empty", "No courses yet." }
        } else {
            div { class: "course-grid",
                for card in data.courses {
                    CourseCard { key: "{card.id}", card }
                }
            }
        }
    }
}

#[component]
fn StatsRow(stats: StatsVm) -> Element {
    rsx! {
        div { class: "stats",
            div { class: "stat",
                span { class: "stat-label", "Lessons completed" }
                span { class: "stat-value", "{stats.completed_label}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Overall progress" }
                span { class: "stat-value", "{stats.percent}%" }
            }
            div { class: "stat",
                span { class: "stat-label", "Streak" }
                span { class: "stat-value", "{stats.streak_label}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Badges" }
                span { class: "stat-value", "{stats.badges_label}" }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    rsx! {
        article { class: "course-card",
            h3 { "{card.title}" }
            if let Some(description) = card.description {
                p { class: "course-description", "{description}" }
            }
            p { class: "course-meta",
                span { "{card.lessons_label}" }
                span { "{card.duration_label}" }
            }
            if let Some(progress) = card.progress {
                div { class: "progress",
                    div { class: "progress-fill", style: "width: {progress.percent}%" }
                }
                p { class: "progress-label", "{progress.label}" }
            }
            Link {
                class: "btn btn-primary",
                to: Route::Course { course_id: card.id.to_string() },
                "{card.cta_label}"
            }
        }
    }
}
