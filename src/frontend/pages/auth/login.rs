use crate::backend::utils::route::Route;
use crate::frontend::components::layout::AuthLayout;
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;
use dioxus_router::{Link, navigator};

#[component]
pub fn Login() -> Element {
    let nav = navigator();
    let auth = use_context::<AuthState>();
    let status = auth.status;
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Already signed in: go straight to the dashboard
    use_effect(move || {
        if status.read().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting() {
            return;
        }

        let mut auth = auth.clone();
        let username_value = username.read().clone();
        let password_value = password.read().clone();

        error.set(None);
        submitting.set(true);
        spawn(async move {
            match auth.login(username_value, password_value).await {
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
            h1 { "Sign in" }
            p { class: "muted", "Single Cell RNA Analysis Platform" }
            form { class: "auth-form", onsubmit: on_submit,
                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: "{username}",
                    autofocus: true,
                    oninput: move |e| username.set(e.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
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
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
            p { class: "auth-switch",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
