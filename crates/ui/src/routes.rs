use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use portal_core::model::Viewer;
use tracing::warn;

use crate::context::{AppContext, use_viewer};
use crate::views::{AuthView, CourseView, DashboardView, LessonView, NotFoundView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/course/:course_id", CourseView)] Course { course_id: String },
        #[route("/lesson/:lesson_id", LessonView)] Lesson { lesson_id: String },
        #[route("/auth", AuthView)] Auth {},
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let viewer = use_viewer();
    let auth = ctx.auth();
    let email = auth.email().unwrap_or_default();

    let sign_out = move |_| {
        let auth = auth.clone();
        spawn(async move {
            let mut viewer = viewer;
            if let Err(err) = auth.sign_out().await {
                warn!(error = %err, "sign out failed");
            }
            viewer.set(Viewer::Anonymous);
            navigator.push(Route::Dashboard {});
        });
    };

    rsx! {
        header { class: "topbar",
            Link { class: "brand", to: Route::Dashboard {}, "Learning Portal" }
            span { class: "backend-tag", "{ctx.backend_label()}" }
            nav { class: "session",
                if viewer().is_signed_in() {
                    span { class: "session-email", "{email}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: sign_out,
                        "Sign out"
                    }
                } else {
                    Link { class: "btn btn-primary", to: Route::Auth {}, "Sign in" }
                }
            }
        }
    }
}
