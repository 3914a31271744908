//! Subscription and usage page.

use crate::backend::api::ApiClient;
use crate::backend::api::models::DashboardStats;
use crate::backend::utils::formatter::{format_hours, format_storage_gb};
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;

/// Rows of the usage table.
fn usage_rows(stats: &DashboardStats) -> [(&'static str, String); 4] {
    [
        ("Storage used", format_storage_gb(stats.storage_used_mb)),
        ("Compute used", format_hours(stats.compute_hours_used)),
        ("Jobs run", stats.total_jobs.to_string()),
        ("Failed jobs", stats.failed_jobs.to_string()),
    ]
}

#[component]
pub fn Billing() -> Element {
    let auth = use_context::<AuthState>();
    let client = use_context::<ApiClient>();

    let stats = use_resource(move || {
        let client = client.clone();
        async move {
            let result = client.user_stats().await;
            if let Err(e) = &result {
                log::error!("Failed to fetch usage: {e}");
            }
            result
        }
    });

    let tier = auth
        .current_user()
        .map(|user| user.subscription_tier.label())
        .unwrap_or_default();

    let usage = match &*stats.read() {
        None => rsx! { div { class: "loading-placeholder", "Loading usage..." } },
        Some(Err(e)) => rsx! { p { class: "error-text", "Could not load usage: {e}" } },
        Some(Ok(stats)) => rsx! {
            dl { class: "detail-grid",
                {usage_rows(stats).into_iter().map(|(label, value)| rsx! {
                    dt { "{label}" }
                    dd { "{value}" }
                })}
            }
        },
    };

    rsx! {
        section { class: "panel",
            h2 { "Subscription" }
            p { "Current plan: " span { class: "tier", "{tier}" } }
        }
        section { class: "panel",
            h2 { "Usage" }
            {usage}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_rows_format_units() {
        let stats = DashboardStats {
            total_jobs: 14,
            failed_jobs: 2,
            storage_used_mb: 3072.0,
            compute_hours_used: 7.3,
            ..DashboardStats::default()
        };
        let rows = usage_rows(&stats);
        assert_eq!(rows[0], ("Storage used", "3.00 GB".to_string()));
        assert_eq!(rows[1], ("Compute used", "7.3 h".to_string()));
        assert_eq!(rows[2].1, "14");
        assert_eq!(rows[3].1, "2");
    }
}
