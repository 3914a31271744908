use crate::backend::utils::route::Route;
use dioxus::prelude::*;
use dioxus_router::{Link, use_route};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavTab {
    Dashboard,
    Upload,
    Jobs,
    Billing,
}

impl NavTab {
    pub const ALL: [NavTab; 4] = [Self::Dashboard, Self::Upload, Self::Jobs, Self::Billing];

    pub fn for_route(route: &Route) -> Option<Self> {
        match route {
            Route::Dashboard {} => Some(Self::Dashboard),
            Route::Upload {} => Some(Self::Upload),
            // Job details stay under the Jobs tab
            Route::JobList {} | Route::JobDetails { .. } => Some(Self::Jobs),
            Route::Billing {} => Some(Self::Billing),
            Route::Login {} | Route::Register {} => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Upload => "Upload",
            Self::Jobs => "Jobs",
            Self::Billing => "Billing",
        }
    }

    pub fn target(self) -> Route {
        match self {
            Self::Dashboard => Route::Dashboard {},
            Self::Upload => Route::Upload {},
            Self::Jobs => Route::JobList {},
            Self::Billing => Route::Billing {},
        }
    }
}

#[component]
pub fn Navigation(username: String, on_logout: EventHandler<()>) -> Element {
    let route = use_route::<Route>();
    let active_tab = NavTab::for_route(&route);

    rsx! {
        nav { class: "navigation",
            span { class: "nav-brand", "Cell Analysis" }
            ul { class: "nav-items",
                {NavTab::ALL.into_iter().map(|tab| {
                    let label = tab.label();
                    rsx! {
                        li {
                            key: "{label}",
                            class: if active_tab == Some(tab) { "nav-item active" } else { "nav-item" },
                            Link { to: tab.target(), "{label}" }
                        }
                    }
                })}
            }
            div { class: "nav-user",
                span { "{username}" }
                button {
                    class: "button button-ghost",
                    onclick: move |_| on_logout.call(()),
                    "Logout"
                }
            }
        }
    }
}
