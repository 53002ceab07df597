use dioxus::prelude::*;
use dioxus::core::{Task, spawn_forever};
use portal_core::model::{LessonId, QuizQuestion};
use portal_core::quiz::QuizOutcome;
use services::QuizAdvance;
use tracing::debug;

use crate::context::AppContext;
use crate::vm::{QuestionVm, QuizScreen, QuizSummaryVm};

#[component]
pub fn QuizPanel(
    lesson_id: LessonId,
    questions: Vec<QuizQuestion>,
    on_passed: EventHandler<QuizOutcome>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let flow = use_signal(move || ctx.quiz(lesson_id, questions));
    let timer = use_signal(|| None::<Task>);

    let select = use_callback(move |option: usize| {
        let mut flow = flow;
        if let Err(err) = flow.write().select(option) {
            debug!(error = %err, "quiz selection ignored");
        }
    });

    let submit = use_callback(move |()| {
        let mut flow = flow;
        let mut timer = timer;
        let submitted = flow.write().submit();
        let reveal = match submitted {
            Ok(reveal) => reveal,
            Err(err) => {
                debug!(error = %err, "quiz submit ignored");
                return;
            }
        };
        let wait = (reveal.deadline.at - flow.read().now())
            .to_std()
            .unwrap_or_default();
        let task = spawn(async move {
            tokio::time::sleep(wait).await;
            let advanced = flow.write().fire(reveal.deadline.ticket);
            if let Some(QuizAdvance::Completed { outcome, write }) = advanced {
                if outcome.passed() {
                    on_passed.call(outcome);
                }
                spawn_forever(async move {
                    write.commit().await;
                });
            }
        });
        timer.set(Some(task));
    });

    let restart = use_callback(move |()| {
        let mut flow = flow;
        let mut timer = timer;
        let pending = timer.write().take();
        if let Some(task) = pending {
            task.cancel();
        }
        flow.write().restart();
    });

    let screen = QuizScreen::from_session(flow.read().session());

    rsx! {
        div { class: "quiz",
            match screen {
                QuizScreen::Empty => rsx! {
                    p { class: "empty", "No quiz questions for this lesson yet." }
                },
                QuizScreen::Question(question) => rsx! {
                    QuestionCard { question, on_select: select, on_submit: submit }
                },
                QuizScreen::Complete(summary) => rsx! {
                    QuizSummary { summary, on_restart: restart }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    on_select: Callback<usize>,
    on_submit: Callback<()>,
) -> Element {
    rsx! {
        div { class: "quiz-question",
            p { class: "quiz-position", "{question.position_label}" }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {question.percent}%" }
            }
            h3 { class: "quiz-prompt", "{question.prompt}" }
            div { class: "quiz-options",
                for option in question.options {
                    button {
                        key: "{option.index}",
                        class: option.state.class(),
                        r#type: "button",
                        disabled: question.locked,
                        onclick: move |_| on_select.call(option.index),
                        "{option.label}"
                    }
                }
            }
            if let Some(feedback) = question.feedback {
                if feedback.correct {
                    p { class: "feedback correct", "Correct!" }
                } else {
                    p { class: "feedback wrong",
                        "Wrong. The correct answer is: {feedback.correct_answer}"
                    }
                }
            } else {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !question.can_submit,
                    onclick: move |_| on_submit.call(()),
                    "Check answer"
                }
            }
        }
    }
}

#[component]
fn QuizSummary(summary: QuizSummaryVm, on_restart: Callback<()>) -> Element {
    let verdict_class = if summary.passed {
        "badge badge-success"
    } else {
        "badge badge-warning"
    };
    rsx! {
        div { class: "quiz-summary",
            h3 { "Quiz complete" }
            p { class: "quiz-score", "{summary.score_label}" }
            p { "{summary.tally_label}" }
            span { class: verdict_class, "{summary.verdict}" }
            ul { class: "quiz-results",
                for (i, row) in summary.rows.into_iter().enumerate() {
                    li { key: "{i}",
                        if row.correct {
                            span { class: "mark correct", "✓" }
                        } else {
                            span { class: "mark wrong", "✗" }
                        }
                        span { "{row.prompt}" }
                    }
                }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Try again"
            }
        }
    }
}
