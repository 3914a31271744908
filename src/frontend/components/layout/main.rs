use crate::backend::utils::css::ResourceLoader;
use crate::backend::utils::route::Route;
use crate::frontend::components::layout::Navigation;
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;
use dioxus_router::{Outlet, navigator};

/// Shell around every signed-in page.
#[component]
pub fn Layout() -> Element {
    let nav = navigator();
    let auth = use_context::<AuthState>();
    let username = auth
        .current_user()
        .map(|user| user.username)
        .unwrap_or_default();

    let on_logout = move |()| {
        let mut auth = auth.clone();
        spawn(async move {
            auth.logout().await;
            nav.replace(Route::Login {});
        });
    };

    rsx! {
        style {
            dangerous_inner_html: ResourceLoader::get_main_css()
        }

        Navigation { username, on_logout }

        main { class: "main-content",
            Outlet::<Route> {}
        }
    }
}
