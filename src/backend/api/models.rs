//! Data shapes exchanged with the platform API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate usage numbers for the signed-in user.
///
/// Every field is optional on the wire and falls back to zero, so a partial
/// payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_jobs: u64,
    pub running_jobs: u64,
    pub completed_jobs: u64,
    pub failed_jobs: u64,
    pub storage_used_mb: f64,
    pub compute_hours_used: f64,
}

/// Lifecycle state of an analysis job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    /// A status this client does not know about, kept verbatim.
    Other(String),
}

impl JobStatus {
    /// Statuses offered in the job list filter.
    pub const KNOWN: [JobStatus; 5] = [
        JobStatus::Pending,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    /// CSS class for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "badge badge-pending",
            Self::Running => "badge badge-running",
            Self::Completed => "badge badge-completed",
            Self::Failed => "badge badge-failed",
            Self::Cancelled => "badge badge-cancelled",
            Self::Other(_) => "badge badge-unknown",
        }
    }

    /// Badge text, upper-cased.
    pub fn label(&self) -> String {
        match self {
            Self::Other(raw) if raw.trim().is_empty() => "UNKNOWN".to_string(),
            other => other.as_str().to_uppercase(),
        }
    }

    /// Whether the API still accepts a cancel request for this job.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i64,
    pub job_name: String,
    pub job_type: String,
    pub status: JobStatus,
    pub submitted_at: String,
}

/// Full job record as returned by `GET /api/jobs/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub id: i64,
    pub job_name: String,
    pub job_type: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress_percent: i32,
    #[serde(default)]
    pub current_step: Option<String>,
    pub submitted_at: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub result_summary: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl JobDetails {
    pub fn can_cancel(&self) -> bool {
        self.status.is_cancellable()
    }

    /// Progress clamped to 0..=100 for the progress bar.
    pub fn progress(&self) -> u8 {
        self.progress_percent.clamp(0, 100) as u8
    }
}

/// Analyses the pipeline can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Clustering,
    Annotation,
    DifferentialExpression,
}

impl JobKind {
    pub const ALL: [JobKind; 3] = [
        JobKind::Clustering,
        JobKind::Annotation,
        JobKind::DifferentialExpression,
    ];

    /// Wire value of `job_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clustering => "clustering",
            Self::Annotation => "annotation",
            Self::DifferentialExpression => "differential_expression",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clustering => "Clustering",
            Self::Annotation => "Cell type annotation",
            Self::DifferentialExpression => "Differential expression",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// Analysis settings sent with a new job.
///
/// Unset fields are omitted so the server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_pcs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group1: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group2: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_method: Option<String>,
}

/// Body of `POST /api/jobs/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCreate {
    pub job_name: String,
    pub job_type: String,
    pub input_file_id: String,
    pub parameters: JobParameters,
}

/// A file produced by a finished job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFile {
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    pub download_url: String,
}

/// Body of `GET /api/jobs/{id}/results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResults {
    pub job_id: i64,
    pub status: JobStatus,
    /// Free-form summary written by the analysis script.
    #[serde(default)]
    pub result_summary: Option<serde_json::Value>,
    #[serde(default)]
    pub output_files: Vec<OutputFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionTier {
    Free,
    Basic,
    Pro,
    Enterprise,
    Other(String),
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
            Self::Other(raw) => raw,
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Unknown".to_string(),
        }
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        Self::Free
    }
}

impl From<String> for SubscriptionTier {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "basic" => Self::Basic,
            "pro" => Self::Pro,
            "enterprise" => Self::Enterprise,
            _ => Self::Other(raw),
        }
    }
}

impl From<SubscriptionTier> for String {
    fn from(tier: SubscriptionTier) -> Self {
        tier.as_str().to_string()
    }
}

/// The signed-in user as reported by `GET /api/users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
}

/// Body of a successful `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_missing_fields_default_to_zero() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total_jobs": 7, "storage_used_mb": 12.5}"#).unwrap();
        assert_eq!(stats.total_jobs, 7);
        assert_eq!(stats.running_jobs, 0);
        assert_eq!(stats.failed_jobs, 0);
        assert_eq!(stats.storage_used_mb, 12.5);
        assert_eq!(stats.compute_hours_used, 0.0);
    }

    #[test]
    fn job_summary_ignores_extra_response_fields() {
        let body = r#"{
            "id": 42,
            "job_name": "PBMC clustering",
            "job_type": "clustering",
            "status": "running",
            "progress_percent": 40,
            "current_step": "pca",
            "submitted_at": "2024-03-01T09:30:00",
            "started_at": null,
            "completed_at": null,
            "result_summary": null,
            "error_message": null
        }"#;
        let job: JobSummary = serde_json::from_str(body).unwrap();
        assert_eq!(job.id, 42);
        assert_eq!(job.status, JobStatus::Running);
    }

    #[test]
    fn unknown_status_is_preserved_with_fallback_styling() {
        let status: JobStatus = serde_json::from_str(r#""queued""#).unwrap();
        assert_eq!(status, JobStatus::Other("queued".to_string()));
        assert_eq!(status.badge_class(), "badge badge-unknown");
        assert_eq!(status.label(), "QUEUED");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""queued""#);
    }

    #[test]
    fn every_known_status_has_its_own_badge() {
        let classes: Vec<&str> = JobStatus::KNOWN.iter().map(JobStatus::badge_class).collect();
        for (i, class) in classes.iter().enumerate() {
            assert_ne!(*class, "badge badge-unknown");
            assert!(!classes[i + 1..].contains(class));
        }
    }

    #[test]
    fn only_pending_and_running_jobs_are_cancellable() {
        assert!(JobStatus::Pending.is_cancellable());
        assert!(JobStatus::Running.is_cancellable());
        assert!(!JobStatus::Completed.is_cancellable());
        assert!(!JobStatus::Failed.is_cancellable());
        assert!(!JobStatus::Cancelled.is_cancellable());
        assert!(!JobStatus::Other("archived".into()).is_cancellable());
    }

    #[test]
    fn profile_tier_parses_and_labels() {
        let user: UserProfile =
            serde_json::from_str(r#"{"username":"ada","subscription_tier":"pro"}"#).unwrap();
        assert_eq!(user.subscription_tier, SubscriptionTier::Pro);
        assert_eq!(user.subscription_tier.label(), "Pro");

        let user: UserProfile = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(user.subscription_tier, SubscriptionTier::Free);
    }

    #[test]
    fn job_details_progress_is_clamped() {
        let mut job: JobDetails = serde_json::from_str(
            r#"{"id":1,"job_name":"x","job_type":"annotation","status":"pending","submitted_at":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(job.progress(), 0);
        assert!(job.can_cancel());
        job.progress_percent = 250;
        assert_eq!(job.progress(), 100);
    }

    #[test]
    fn out_of_range_progress_still_parses() {
        let body = |progress: i32| {
            format!(
                r#"{{"id":1,"job_name":"x","job_type":"clustering","status":"running","progress_percent":{progress},"submitted_at":"2024-01-01T00:00:00"}}"#
            )
        };

        let job: JobDetails = serde_json::from_str(&body(300)).unwrap();
        assert_eq!(job.progress(), 100);

        let job: JobDetails = serde_json::from_str(&body(-5)).unwrap();
        assert_eq!(job.progress(), 0);

        let job: JobDetails = serde_json::from_str(&body(42)).unwrap();
        assert_eq!(job.progress(), 42);
    }

    #[test]
    fn job_kinds_use_backend_names() {
        assert_eq!(
            JobKind::DifferentialExpression.as_str(),
            "differential_expression"
        );
        for kind in JobKind::ALL {
            assert_eq!(JobKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(JobKind::parse("trajectory"), None);
    }

    #[test]
    fn job_create_omits_unset_parameters() {
        let request = JobCreate {
            job_name: "PBMC clustering".to_string(),
            job_type: JobKind::Clustering.as_str().to_string(),
            input_file_id: "f-12".to_string(),
            parameters: JobParameters {
                resolution: Some(0.8),
                n_pcs: Some(50),
                ..JobParameters::default()
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "job_name": "PBMC clustering",
                "job_type": "clustering",
                "input_file_id": "f-12",
                "parameters": {"resolution": 0.8, "n_pcs": 50}
            })
        );
    }

    #[test]
    fn results_list_output_files() {
        let body = r#"{
            "job_id": 7,
            "status": "completed",
            "result_summary": {"n_clusters": 12, "n_cells": 4000},
            "output_files": [
                {"filename": "umap.png", "size": 20480, "download_url": "/api/jobs/7/download/umap.png"},
                {"filename": "clusters.csv", "size": 512, "download_url": "/api/jobs/7/download/clusters.csv"}
            ]
        }"#;
        let results: JobResults = serde_json::from_str(body).unwrap();
        assert_eq!(results.status, JobStatus::Completed);
        assert_eq!(results.output_files.len(), 2);
        assert_eq!(results.output_files[0].filename, "umap.png");
        assert_eq!(results.output_files[0].size, 20480);
        assert_eq!(
            results.result_summary,
            Some(serde_json::json!({"n_clusters": 12, "n_cells": 4000}))
        );
    }

    #[test]
    fn results_without_files_or_summary() {
        let results: JobResults =
            serde_json::from_str(r#"{"job_id": 3, "status": "completed", "result_summary": null}"#)
                .unwrap();
        assert_eq!(results.result_summary, None);
        assert!(results.output_files.is_empty());
    }
}
