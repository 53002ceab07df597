use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn NotFoundPanel(title: String) -> Element {
    rsx! {
        div { class: "page not-found",
            h2 { "{title}" }
            p { "It may have been moved or removed." }
            Link { class: "btn btn-primary", to: Route::Dashboard {}, "Back to courses" }
        }
    }
}

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        NotFoundPanel { title: "Page not found" }
        if !path.is_empty() {
            p { class: "muted", "/{path}" }
        }
    }
}
