//! Dashboard view state.

use crate::backend::api::ApiClient;
use crate::backend::api::models::{
    DashboardStats, JobCreate, JobKind, JobParameters, JobStatus, JobSummary,
};
use crate::backend::services::dashboard::{DashboardLoad, FetchFailure, LoadOutcome};
use crate::backend::services::{LoadOptions, load_dashboard};
use crate::backend::utils::config::AppConfig;
use crate::backend::utils::formatter::{format_local_date, format_storage_gb, humanize_job_type};
use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;

/// What the dashboard shows.
///
/// Starts loading with no data and settles exactly once.
#[derive(Clone, PartialEq, Debug)]
pub struct DashboardViewState {
    pub loading: bool,
    pub stats: Option<DashboardStats>,
    pub jobs: Vec<JobSummary>,
    pub failures: Vec<FetchFailure>,
}

impl Default for DashboardViewState {
    fn default() -> Self {
        Self {
            loading: true,
            stats: None,
            jobs: Vec::new(),
            failures: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CardColor {
    Blue,
    Yellow,
    Green,
    Purple,
}

impl CardColor {
    pub fn class(self) -> &'static str {
        match self {
            Self::Blue => "stat-card stat-blue",
            Self::Yellow => "stat-card stat-yellow",
            Self::Green => "stat-card stat-green",
            Self::Purple => "stat-card stat-purple",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct StatCardModel {
    pub title: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub color: CardColor,
}

#[derive(Clone, PartialEq, Debug)]
pub struct JobRowModel {
    pub id: i64,
    pub name: String,
    pub job_type: String,
    pub status: JobStatus,
    pub submitted: String,
}

impl From<&JobSummary> for JobRowModel {
    fn from(job: &JobSummary) -> Self {
        Self {
            id: job.id,
            name: job.job_name.clone(),
            job_type: humanize_job_type(&job.job_type),
            status: job.status.clone(),
            submitted: format_local_date(&job.submitted_at),
        }
    }
}

impl DashboardViewState {
    /// Applies a finished load. Returns `false` if the state had already settled.
    pub fn settle(&mut self, load: DashboardLoad) -> bool {
        if !self.loading {
            return false;
        }
        self.loading = false;
        self.stats = load.stats;
        self.jobs = load.jobs;
        self.failures = load.failures;
        true
    }

    pub fn outcome(&self) -> Option<LoadOutcome> {
        if self.loading {
            None
        } else if self.failures.is_empty() {
            Some(LoadOutcome::Loaded)
        } else {
            Some(LoadOutcome::LoadedWithPartialFailure)
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.outcome() == Some(LoadOutcome::LoadedWithPartialFailure)
    }

    /// The four stat cards, zero-filled when statistics are missing.
    pub fn stat_cards(&self) -> [StatCardModel; 4] {
        let stats = self.stats.clone().unwrap_or_default();
        [
            StatCardModel {
                title: "Total Jobs",
                value: stats.total_jobs.to_string(),
                icon: "📊",
                color: CardColor::Blue,
            },
            StatCardModel {
                title: "Running Jobs",
                value: stats.running_jobs.to_string(),
                icon: "⚡",
                color: CardColor::Yellow,
            },
            StatCardModel {
                title: "Completed Jobs",
                value: stats.completed_jobs.to_string(),
                icon: "✅",
                color: CardColor::Green,
            },
            StatCardModel {
                title: "Storage Used",
                value: format_storage_gb(stats.storage_used_mb),
                icon: "💾",
                color: CardColor::Purple,
            },
        ]
    }

    /// One line per failed request, for the degraded-data hint.
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("Could not load {}: {}", f.request, f.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn shows_empty_state(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Rows in the order the API returned them.
    pub fn job_rows(&self) -> Vec<JobRowModel> {
        self.jobs.iter().map(JobRowModel::from).collect()
    }
}

/// Inputs of the new-job form, held as typed text until submitted.
#[derive(Clone, PartialEq, Debug)]
pub struct JobForm {
    pub kind: JobKind,
    pub job_name: String,
    pub input_file_id: String,
    pub resolution: String,
    pub n_pcs: String,
    pub reference_dataset: String,
    pub group1: String,
    pub group2: String,
    pub test_method: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            kind: JobKind::Clustering,
            job_name: String::new(),
            input_file_id: String::new(),
            resolution: "0.8".to_string(),
            n_pcs: "50".to_string(),
            reference_dataset: String::new(),
            group1: String::new(),
            group2: String::new(),
            test_method: "wilcoxon".to_string(),
        }
    }
}

impl JobForm {
    /// Builds the request body, sending only the parameters of the chosen kind.
    ///
    /// Blank optional fields are left out so the server default applies.
    pub fn to_request(&self) -> Result<JobCreate, String> {
        let job_name = self.job_name.trim();
        if job_name.is_empty() {
            return Err("Job name is required".to_string());
        }
        let input_file_id = self.input_file_id.trim();
        if input_file_id.is_empty() {
            return Err("Input file ID is required".to_string());
        }

        let parameters = match self.kind {
            JobKind::Clustering => JobParameters {
                resolution: parse_positive(&self.resolution)
                    .map_err(|()| "Resolution must be a positive number".to_string())?,
                n_pcs: parse_positive(&self.n_pcs).map_err(|()| {
                    "Number of principal components must be a positive whole number".to_string()
                })?,
                ..JobParameters::default()
            },
            JobKind::Annotation => JobParameters {
                reference_dataset: non_blank(&self.reference_dataset),
                ..JobParameters::default()
            },
            JobKind::DifferentialExpression => JobParameters {
                group1: split_list(&self.group1),
                group2: split_list(&self.group2),
                test_method: non_blank(&self.test_method),
                ..JobParameters::default()
            },
        };

        Ok(JobCreate {
            job_name: job_name.to_string(),
            job_type: self.kind.as_str().to_string(),
            input_file_id: input_file_id.to_string(),
            parameters,
        })
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// `"a, b,,c"` -> `["a", "b", "c"]`; nothing listed is `None`.
fn split_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Blank is `Ok(None)`; anything not parsing to a value above zero is an error.
fn parse_positive<T>(raw: &str) -> Result<Option<T>, ()>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => Err(()),
    }
}

/// Loads the dashboard once per mount.
///
/// The load is cancelled when the calling component unmounts, and a
/// cancelled load never writes to the returned signal.
pub fn use_dashboard() -> Signal<DashboardViewState> {
    let client = use_context::<ApiClient>();
    let config = use_context::<AppConfig>();
    let mut state = use_signal(DashboardViewState::default);
    let cancel = use_hook(CancellationToken::new);

    use_drop({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    use_hook(move || {
        spawn(async move {
            let options = LoadOptions::from(&config.api);
            match load_dashboard(&client, options, &cancel).await {
                Ok(load) if !cancel.is_cancelled() => {
                    log::debug!("Dashboard settled: {:?}", load.outcome());
                    state.write().settle(load);
                }
                Ok(_) | Err(_) => log::debug!("Dashboard load abandoned"),
            }
        })
    });

    state
}
