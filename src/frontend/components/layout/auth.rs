use crate::backend::utils::css::ResourceLoader;
use dioxus::prelude::*;

#[component]
pub fn AuthLayout(children: Element) -> Element {
    rsx! {
        style {
            dangerous_inner_html: ResourceLoader::get_auth_css()
        }

        div { class: "auth-container",
            div { class: "auth-card",
                {children}
            }
        }
    }
}
