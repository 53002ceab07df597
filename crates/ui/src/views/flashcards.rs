use dioxus::prelude::*;
use dioxus::core::spawn_forever;
use portal_core::model::{Flashcard, LessonId};

use crate::context::AppContext;
use crate::vm::FlashcardsVm;

#[component]
pub fn FlashcardsPanel(lesson_id: LessonId, cards: Vec<Flashcard>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut flow = use_signal(move || ctx.flashcards(lesson_id, cards));

    let flip = move |_| {
        let pending = flow.write().flip();
        if let Some(write) = pending {
            spawn_forever(async move {
                write.commit().await;
            });
        }
    };

    let Some(vm) = FlashcardsVm::from_session(flow.read().session()) else {
        return rsx! {
            p { class: "empty", "No flashcards for this lesson yet." }
        };
    };
    let card_class = if vm.flipped {
        "flashcard flipped"
    } else {
        "flashcard"
    };

    rsx! {
        div { class: "flashcards",
            div { class: "flashcards-header",
                span { "{vm.position_label}" }
                span { class: "muted", "{vm.reviewed_label}" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| flow.write().reset(),
                    "Start over"
                }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {vm.percent}%" }
            }
            button { class: card_class, r#type: "button", onclick: flip,
                span { class: "flashcard-face", "{vm.face_label}" }
                p { class: "flashcard-text", "{vm.text}" }
                span { class: "flashcard-hint",
                    if vm.flipped {
                        "Click to see the question"
                    } else {
                        "Click to reveal the answer"
                    }
                }
            }
            div { class: "flashcards-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.has_previous,
                    onclick: move |_| flow.write().previous(),
                    "← Previous"
                }
                div { class: "dots",
                    for (i, dot) in vm.dots.iter().enumerate() {
                        span { key: "{i}", class: dot.class() }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.has_next,
                    onclick: move |_| flow.write().next(),
                    "Next →"
                }
            }
            if vm.complete {
                p { class: "feedback correct", "You've reviewed every card in this deck." }
            }
        }
    }
}
