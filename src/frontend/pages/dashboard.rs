//! Dashboard page: usage statistics, quick actions and recent jobs.

use crate::backend::utils::route::Route;
use crate::frontend::components::common::{JobRow, StatCard};
use crate::frontend::services::context::AuthState;
use crate::frontend::services::states::use_dashboard;
use dioxus::prelude::*;
use dioxus_router::Link;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_context::<AuthState>();
    let view = use_dashboard();

    let state = view.read();
    if state.loading {
        return rsx! {
            div { class: "loading-placeholder", "Loading dashboard..." }
        };
    }

    let user = auth.current_user();
    let username = user.as_ref().map(|u| u.username.clone()).unwrap_or_default();
    let tier = user
        .map(|u| u.subscription_tier.label())
        .unwrap_or_default();
    let cards = state.stat_cards();
    let rows = state.job_rows();
    let degraded = state.is_degraded();
    let failure_summary = state.failure_summary();
    let empty = state.shows_empty_state();
    drop(state);

    rsx! {
        section { class: "panel welcome",
            h1 { "Welcome back, {username}!" }
            p { class: "muted",
                "Subscription: "
                span { class: "tier", "{tier}" }
            }
        }

        div { class: "stats-grid",
            {cards.into_iter().map(|card| {
                let title = card.title;
                rsx! { StatCard { key: "{title}", card } }
            })}
        }
        if degraded {
            p { class: "degraded-note", title: "{failure_summary}",
                "Some dashboard data could not be loaded."
            }
        }

        section { class: "panel",
            h2 { "Quick Actions" }
            div { class: "quick-actions",
                Link { class: "quick-action quick-blue", to: Route::Upload {},
                    span { class: "icon", "📤" }
                    "Upload Data"
                }
                Link { class: "quick-action quick-green", to: Route::JobList {},
                    span { class: "icon", "🔬" }
                    "View All Jobs"
                }
                Link { class: "quick-action quick-purple", to: Route::Billing {},
                    span { class: "icon", "💳" }
                    "Manage Billing"
                }
            }
        }

        section { class: "panel",
            h2 { "Recent Jobs" }
            if empty {
                p { class: "empty-state", "No jobs yet. Upload data to get started!" }
            } else {
                div { class: "job-rows",
                    {rows.into_iter().map(|row| {
                        let id = row.id;
                        rsx! { JobRow { key: "{id}", row } }
                    })}
                }
            }
        }
    }
}
