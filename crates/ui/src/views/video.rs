use dioxus::prelude::*;
use portal_core::video::VideoSource;

use crate::context::AppContext;

#[component]
pub fn VideoPanel(source: VideoSource, title: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut loaded = use_signal(|| false);
    let external = source.external_url().to_string();
    let open_external = move |_| ctx.open_url(&external);

    match source.embed_url() {
        Some(embed) if loaded() => rsx! {
            div { class: "video-frame",
                iframe {
                    src: "{embed}?autoplay=1",
                    title: "{title}",
                    "allow": "accelerometer; autoplay; encrypted-media; picture-in-picture",
                    "allowfullscreen": "true",
                    "referrerpolicy": "strict-origin-when-cross-origin",
                }
            }
        },
        Some(_) => rsx! {
            div { class: "video-poster",
                p { "{title}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| loaded.set(true),
                    "Load video"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: open_external,
                    "Open on YouTube"
                }
            }
        },
        None if matches!(source, VideoSource::External { .. }) => rsx! {
            div { class: "video-poster",
                p { "This video can't be played inside the app." }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: open_external,
                    "Open video externally"
                }
            }
        },
        None => match source {
            VideoSource::Invalid { raw } if !raw.trim().is_empty() => rsx! {
                div { class: "video-poster",
                    p { "The video link for this lesson is not valid." }
                    code { class: "muted", "{raw}" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: open_external,
                        "Open link externally"
                    }
                }
            },
            _ => rsx! {
                p { class: "empty", "No video is available for this lesson." }
            },
        },
    }
}
