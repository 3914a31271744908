use crate::backend::api::models::Registration;
use crate::backend::utils::route::Route;
use crate::frontend::components::layout::AuthLayout;
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;
use dioxus_router::{Link, navigator};

#[component]
pub fn Register() -> Element {
    let nav = navigator();
    let auth = use_context::<AuthState>();
    let mut email = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting() {
            return;
        }

        let mut auth = auth.clone();
        let full_name_value = full_name.read().trim().to_string();
        let registration = Registration {
            email: email.read().trim().to_string(),
            username: username.read().trim().to_string(),
            password: password.read().clone(),
            full_name: (!full_name_value.is_empty()).then_some(full_name_value),
        };

        error.set(None);
        submitting.set(true);
        spawn(async move {
            match auth.register(registration).await {
                Ok(()) => {
                    nav.replace(Route::Dashboard {});
                }
                Err(message) => {
                    error.set(Some(message));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        AuthLayout {
            h1 { "Create account" }
            form { class: "auth-form", onsubmit: on_submit,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Full name (optional)",
                    value: "{full_name}",
                    oninput: move |e| full_name.set(e.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (8+ characters)",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                if let Some(message) = error() {
                    p { class: "error-text", "{message}" }
                }
                button {
                    class: "button",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating account..." } else { "Create account" }
                }
            }
            p { class: "auth-switch",
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
