use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{AuthService, SignUpResult};

use crate::context::{AppContext, use_viewer};
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let viewer = use_viewer();
    let auth = ctx.auth();

    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let busy = use_signal(|| false);

    if viewer().is_signed_in() {
        let who = auth.email().unwrap_or_default();
        return rsx! {
            div { class: "page auth",
                h2 { "You're signed in" }
                p { "Signed in as {who}." }
                Link { class: "btn btn-primary", to: Route::Dashboard {}, "Go to courses" }
            }
        };
    }

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = mode();
        let email_value = email();
        let password_value = password();
        let name_value = name();

        let checked = match current {
            AuthMode::SignIn => AuthService::validate_sign_in(&email_value, &password_value),
            AuthMode::SignUp => {
                AuthService::validate_sign_up(&email_value, &password_value, &name_value)
            }
        };
        if let Err(err) = checked {
            error.set(Some(err.user_message()));
            return;
        }

        let auth = auth.clone();
        spawn(async move {
            let mut busy = busy;
            let mut viewer = viewer;
            let mut error = error;
            let mut notice = notice;
            let mut mode = mode;
            busy.set(true);
            error.set(None);
            notice.set(None);

            let result = match current {
                AuthMode::SignIn => auth
                    .sign_in(&email_value, &password_value)
                    .await
                    .map(SignUpResult::SignedIn),
                AuthMode::SignUp => auth.sign_up(&email_value, &password_value, &name_value).await,
            };
            busy.set(false);

            match result {
                Ok(SignUpResult::SignedIn(signed_in)) => {
                    viewer.set(signed_in);
                    navigator.push(Route::Dashboard {});
                }
                Ok(SignUpResult::ConfirmationPending { email }) => {
                    notice.set(Some(format!(
                        "Check {email} for a confirmation link, then sign in."
                    )));
                    mode.set(AuthMode::SignIn);
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    let (title, submit_label, switch_label) = match mode() {
        AuthMode::SignIn => ("Sign in", "Sign in", "No account yet? Sign up"),
        AuthMode::SignUp => ("Create an account", "Sign up", "Already have an account? Sign in"),
    };

    rsx! {
        div { class: "page auth",
            h2 { "{title}" }
            form { class: "auth-form", onsubmit: on_submit,
                if mode() == AuthMode::SignUp {
                    label { r#for: "auth-name", "Name" }
                    input {
                        id: "auth-name",
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                label { r#for: "auth-email", "Email" }
                input {
                    id: "auth-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "auth-password", "Password" }
                input {
                    id: "auth-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                if let Some(message) = notice() {
                    p { class: "form-notice", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    "{submit_label}"
                }
            }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| {
                    error.set(None);
                    notice.set(None);
                    mode.set(match mode() {
                        AuthMode::SignIn => AuthMode::SignUp,
                        AuthMode::SignUp => AuthMode::SignIn,
                    });
                },
                "{switch_label}"
            }
        }
    }
}
