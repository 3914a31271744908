//! Job list and job detail pages.

use crate::backend::api::ApiClient;
use crate::backend::api::models::{JobDetails as Job, JobStatus};
use crate::backend::utils::config::AppConfig;
use crate::backend::api::models::OutputFile;
use crate::backend::utils::formatter::{format_file_size, format_local_datetime, humanize_job_type};
use crate::backend::utils::route::Route;
use crate::frontend::components::common::{JobProgress, JobRow, StatusBadge};
use crate::frontend::services::states::JobRowModel;
use dioxus::prelude::*;
use dioxus_router::Link;

/// Maps the filter `<select>` value to a status, empty meaning "all".
fn parse_filter(value: &str) -> Option<JobStatus> {
    if value.is_empty() {
        None
    } else {
        Some(JobStatus::from(value.to_string()))
    }
}

#[component]
pub fn JobList() -> Element {
    let client = use_context::<ApiClient>();
    let config = use_context::<AppConfig>();
    let mut filter = use_signal(|| None::<JobStatus>);

    let jobs = use_resource(move || {
        let client = client.clone();
        let limit = config.api.job_list_limit;
        let status = filter();
        async move {
            let result = client.list_jobs(limit, status.as_ref()).await;
            if let Err(e) = &result {
                log::error!("Failed to fetch jobs: {e}");
            }
            result
        }
    });

    let body = match &*jobs.read() {
        None => rsx! { div { class: "loading-placeholder", "Loading jobs..." } },
        Some(Err(e)) => rsx! { p { class: "error-text", "Could not load jobs: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "empty-state", "No jobs found." }
        },
        Some(Ok(list)) => {
            let rows: Vec<JobRowModel> = list.iter().map(JobRowModel::from).collect();
            rsx! {
                div { class: "job-rows",
                    {rows.into_iter().map(|row| {
                        let id = row.id;
                        rsx! { JobRow { key: "{id}", row } }
                    })}
                }
            }
        }
    };

    rsx! {
        section { class: "panel",
            h2 { "Analysis Jobs" }
            div { class: "job-filter",
                label { r#for: "status-filter", "Status" }
                select {
                    id: "status-filter",
                    onchange: move |e| filter.set(parse_filter(&e.value())),
                    option { value: "", "All" }
                    {JobStatus::KNOWN.into_iter().map(|status| {
                        let value = status.as_str().to_string();
                        let label = status.label();
                        rsx! { option { key: "{value}", value: "{value}", "{label}" } }
                    })}
                }
            }
            {body}
        }
    }
}

#[component]
pub fn JobDetails(job_id: i64) -> Element {
    let client = use_context::<ApiClient>();
    let mut action_error = use_signal(|| None::<String>);
    let mut cancelling = use_signal(|| false);

    let mut job = use_resource({
        let client = client.clone();
        use_reactive!(|(job_id,)| {
            let client = client.clone();
            async move { client.job(job_id).await }
        })
    });

    let on_cancel = move |_: MouseEvent| {
        let client = client.clone();
        action_error.set(None);
        cancelling.set(true);
        spawn(async move {
            match client.cancel_job(job_id).await {
                Ok(()) => {
                    log::info!("Cancelled job {job_id}");
                    job.restart();
                }
                Err(e) => {
                    log::error!("Failed to cancel job {job_id}: {e}");
                    action_error.set(Some(e.to_string()));
                }
            }
            cancelling.set(false);
        });
    };

    let body = match &*job.read() {
        None => rsx! { div { class: "loading-placeholder", "Loading job..." } },
        Some(Err(e)) => rsx! { p { class: "error-text", "Could not load job {job_id}: {e}" } },
        Some(Ok(details)) => rsx! {
            JobSummaryPanel { job: details.clone() }
            if details.status == JobStatus::Completed {
                JobResultsPanel { job_id }
            }
            if details.can_cancel() {
                div {
                    button {
                        class: "button button-danger",
                        disabled: cancelling(),
                        onclick: on_cancel,
                        if cancelling() { "Cancelling..." } else { "Cancel job" }
                    }
                }
            }
        },
    };

    rsx! {
        p {
            Link { class: "muted", to: Route::JobList {}, "← All jobs" }
        }
        {body}
        if let Some(message) = action_error() {
            p { class: "error-text", "{message}" }
        }
    }
}

#[component]
fn JobSummaryPanel(job: Job) -> Element {
    let job_type = humanize_job_type(&job.job_type);
    let progress = job.progress();
    let submitted = format_local_datetime(&job.submitted_at);
    let started = job.started_at.as_deref().map(format_local_datetime);
    let completed = job.completed_at.as_deref().map(format_local_datetime);
    let Job {
        job_name,
        status,
        current_step,
        result_summary,
        error_message,
        ..
    } = job;
    let show_progress = matches!(status, JobStatus::Running | JobStatus::Pending);
    // Completed jobs get the full results panel instead
    let result_summary = result_summary.filter(|_| status != JobStatus::Completed);

    rsx! {
        section { class: "panel",
            h2 { "{job_name}" }
            StatusBadge { status }
            dl { class: "detail-grid",
                dt { "Type" }
                dd { class: "job-type", "{job_type}" }
                dt { "Submitted" }
                dd { "{submitted}" }
                if let Some(started) = started {
                    dt { "Started" }
                    dd { "{started}" }
                }
                if let Some(completed) = completed {
                    dt { "Completed" }
                    dd { "{completed}" }
                }
            }
            if show_progress {
                JobProgress { percent: progress, step: current_step }
            }
            if let Some(summary) = result_summary {
                h3 { "Results" }
                pre { class: "result-summary", "{summary}" }
            }
            if let Some(message) = error_message {
                h3 { "Error" }
                p { class: "error-text", "{message}" }
            }
        }
    }
}

/// Renders the `result_summary` object as readable text.
fn summary_text(summary: &serde_json::Value) -> String {
    match summary {
        serde_json::Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[component]
fn JobResultsPanel(job_id: i64) -> Element {
    let client = use_context::<ApiClient>();

    let results = use_resource({
        let client = client.clone();
        use_reactive!(|(job_id,)| {
            let client = client.clone();
            async move {
                let result = client.job_results(job_id).await;
                if let Err(e) = &result {
                    log::error!("Failed to fetch results of job {job_id}: {e}");
                }
                result
            }
        })
    });

    let body = match &*results.read() {
        None => rsx! { div { class: "loading-placeholder", "Loading results..." } },
        Some(Err(e)) => rsx! { p { class: "error-text", "Could not load results: {e}" } },
        Some(Ok(results)) => {
            let summary = results.result_summary.as_ref().map(summary_text);
            let files: Vec<(OutputFile, String)> = results
                .output_files
                .iter()
                .map(|file| (file.clone(), client.url(&file.download_url)))
                .collect();
            rsx! {
                if let Some(summary) = summary {
                    pre { class: "result-summary", "{summary}" }
                }
                if files.is_empty() {
                    p { class: "muted", "No output files." }
                } else {
                    ul { class: "output-files",
                        {files.into_iter().map(|(file, href)| {
                            let size = format_file_size(file.size);
                            let name = file.filename;
                            rsx! {
                                li { key: "{name}",
                                    a { href: "{href}", target: "_blank", "{name}" }
                                    span { class: "muted", "{size}" }
                                }
                            }
                        })}
                    }
                }
            }
        }
    };

    rsx! {
        section { class: "panel",
            h2 { "Results" }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_means_all_jobs() {
        assert_eq!(parse_filter(""), None);
    }

    #[test]
    fn filter_values_map_to_statuses() {
        assert_eq!(parse_filter("running"), Some(JobStatus::Running));
        assert_eq!(parse_filter("cancelled"), Some(JobStatus::Cancelled));
        for status in JobStatus::KNOWN {
            let parsed = parse_filter(status.as_str());
            assert_eq!(parsed, Some(status));
        }
    }

    #[test]
    fn structured_summaries_are_pretty_printed() {
        let summary = serde_json::json!({"n_clusters": 12});
        assert_eq!(summary_text(&summary), "{\n  \"n_clusters\": 12\n}");
        assert_eq!(
            summary_text(&serde_json::json!("Annotation completed")),
            "Annotation completed"
        );
    }
}
