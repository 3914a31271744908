//! Application routing system.

use crate::frontend::pages::auth::{Login, Register};
use crate::frontend::pages::billing::Billing;
use crate::frontend::pages::dashboard::Dashboard;
use crate::frontend::pages::guard::ProtectedRoute;
use crate::frontend::pages::jobs::{JobDetails, JobList};
use crate::frontend::pages::upload::Upload;

use dioxus::prelude::*;
use dioxus_router::Routable;

/// Main routing enum for the application.
#[derive(Clone, Routable, Debug, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Route {
    /// Sign-in page.
    #[route("/login")]
    Login {},
    /// Account creation page.
    #[route("/register")]
    Register {},
    /// Everything below requires a signed-in user.
    #[layout(ProtectedRoute)]
        /// Dashboard with usage statistics and recent jobs.
        #[route("/")]
        Dashboard {},
        /// Data upload instructions.
        #[route("/upload")]
        Upload {},
        /// All analysis jobs.
        #[route("/jobs")]
        JobList {},
        /// A single job.
        #[route("/jobs/:job_id")]
        JobDetails { job_id: i64 },
        /// Subscription and usage.
        #[route("/billing")]
        Billing {},
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(Route::from_str("/").unwrap(), Route::Dashboard {});
        assert_eq!(Route::from_str("/login").unwrap(), Route::Login {});
        assert_eq!(Route::from_str("/jobs").unwrap(), Route::JobList {});
        assert_eq!(
            Route::from_str("/jobs/17").unwrap(),
            Route::JobDetails { job_id: 17 }
        );
        assert_eq!(Route::from_str("/billing").unwrap(), Route::Billing {});
    }

    #[test]
    fn routes_render_back_to_paths() {
        assert_eq!(Route::JobDetails { job_id: 3 }.to_string(), "/jobs/3");
        assert_eq!(Route::Upload {}.to_string(), "/upload");
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert!(Route::from_str("/jobs/not-a-number").is_err());
        assert!(Route::from_str("/settings").is_err());
    }
}
