//! Dashboard data loading.
//!
//! The statistics and recent-jobs requests are issued together and joined
//! with all-settled semantics: the load completes only after both requests
//! have succeeded, failed or timed out. A failed request contributes no data
//! and is reported in [`DashboardLoad::failures`] instead of aborting the load.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures_util::future::join;
use tokio_util::sync::CancellationToken;

use crate::backend::api::models::{DashboardStats, JobSummary};
use crate::backend::api::{ApiClient, ApiError};
use crate::backend::utils::config::ApiConfig;

/// Where dashboard data comes from.
pub trait DashboardSource {
    fn fetch_stats(&self) -> impl Future<Output = Result<DashboardStats, ApiError>>;

    fn fetch_recent_jobs(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<JobSummary>, ApiError>>;
}

impl DashboardSource for ApiClient {
    fn fetch_stats(&self) -> impl Future<Output = Result<DashboardStats, ApiError>> {
        self.user_stats()
    }

    fn fetch_recent_jobs(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<JobSummary>, ApiError>> {
        self.recent_jobs(limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardRequest {
    Stats,
    RecentJobs,
}

impl fmt::Display for DashboardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stats => f.write_str("user statistics"),
            Self::RecentJobs => f.write_str("recent jobs"),
        }
    }
}

/// A request that settled with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub request: DashboardRequest,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    LoadedWithPartialFailure,
}

/// Everything both requests produced once they settled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardLoad {
    pub stats: Option<DashboardStats>,
    pub jobs: Vec<JobSummary>,
    pub failures: Vec<FetchFailure>,
}

impl DashboardLoad {
    pub fn outcome(&self) -> LoadOutcome {
        if self.failures.is_empty() {
            LoadOutcome::Loaded
        } else {
            LoadOutcome::LoadedWithPartialFailure
        }
    }
}

/// Upper bound on recent jobs shown on the dashboard.
pub const MAX_RECENT_JOBS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub recent_jobs_limit: usize,
    pub request_timeout: Duration,
}

impl From<&ApiConfig> for LoadOptions {
    fn from(config: &ApiConfig) -> Self {
        Self {
            recent_jobs_limit: config.recent_jobs_limit.min(MAX_RECENT_JOBS),
            request_timeout: config.request_timeout(),
        }
    }
}

async fn bounded<T>(
    limit: Duration,
    request: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    match tokio::time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout(limit)),
    }
}

/// Loads statistics and recent jobs concurrently.
///
/// Returns [`ApiError::Cancelled`] when `cancel` fires before both requests
/// settle; nothing from an abandoned load should reach the view.
pub async fn load_dashboard<S: DashboardSource>(
    source: &S,
    options: LoadOptions,
    cancel: &CancellationToken,
) -> Result<DashboardLoad, ApiError> {
    let stats = bounded(options.request_timeout, source.fetch_stats());
    let jobs = bounded(
        options.request_timeout,
        source.fetch_recent_jobs(options.recent_jobs_limit),
    );

    let (stats, jobs) = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            log::debug!("Dashboard load cancelled before requests settled");
            return Err(ApiError::Cancelled);
        }
        settled = join(stats, jobs) => settled,
    };

    let mut load = DashboardLoad::default();

    match stats {
        Ok(stats) => load.stats = Some(stats),
        Err(e) => load.failures.push(failure(DashboardRequest::Stats, &e)),
    }

    match jobs {
        Ok(mut jobs) => {
            jobs.truncate(options.recent_jobs_limit);
            load.jobs = jobs;
        }
        Err(e) => load.failures.push(failure(DashboardRequest::RecentJobs, &e)),
    }

    Ok(load)
}

fn failure(request: DashboardRequest, error: &ApiError) -> FetchFailure {
    log::error!("Failed to fetch {request}: {error}");
    FetchFailure {
        request,
        message: error.to_string(),
    }
}
