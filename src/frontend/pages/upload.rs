//! Data upload and job submission page.

use crate::backend::api::ApiClient;
use crate::backend::api::models::JobKind;
use crate::backend::utils::route::Route;
use crate::frontend::services::states::JobForm;
use dioxus::prelude::*;
use dioxus_router::navigator;

/// Input formats the analysis pipeline accepts.
pub const SUPPORTED_FORMATS: [(&str, &str); 3] = [
    (".h5ad", "AnnData object with a count matrix in X"),
    (".h5", "10x Genomics filtered feature-barcode matrix"),
    (".csv", "Gene-by-cell count matrix with gene names in the first column"),
];

#[component]
pub fn Upload() -> Element {
    let nav = navigator();
    let client = use_context::<ApiClient>();
    let mut form = use_signal(JobForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting() {
            return;
        }

        let request = match form.read().to_request() {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };

        let client = client.clone();
        error.set(None);
        submitting.set(true);
        spawn(async move {
            match client.create_job(&request).await {
                Ok(job) => {
                    log::info!("Submitted {} job {}", request.job_type, job.id);
                    nav.push(Route::JobDetails { job_id: job.id });
                }
                Err(e) => {
                    log::error!("Failed to submit job: {e}");
                    error.set(Some(e.to_string()));
                    submitting.set(false);
                }
            }
        });
    };

    let JobForm {
        kind,
        job_name,
        input_file_id,
        resolution,
        n_pcs,
        reference_dataset,
        group1,
        group2,
        test_method,
    } = form.read().clone();
    let kind_value = kind.as_str();

    rsx! {
        section { class: "panel",
            h2 { "Upload Data" }
            p { class: "muted",
                "Upload a single-cell count matrix, then start a clustering, annotation or differential expression job from it."
            }
            dl { class: "detail-grid",
                {SUPPORTED_FORMATS.into_iter().map(|(extension, description)| rsx! {
                    dt { "{extension}" }
                    dd { "{description}" }
                })}
            }
        }
        section { class: "panel",
            h2 { "New Analysis Job" }
            form { class: "job-form", onsubmit: on_submit,
                label { r#for: "job-kind", "Analysis" }
                select {
                    id: "job-kind",
                    value: "{kind_value}",
                    onchange: move |e| {
                        if let Some(kind) = JobKind::parse(&e.value()) {
                            form.write().kind = kind;
                        }
                    },
                    {JobKind::ALL.into_iter().map(|kind| {
                        let value = kind.as_str();
                        let label = kind.label();
                        rsx! { option { key: "{value}", value: "{value}", "{label}" } }
                    })}
                }

                label { r#for: "job-name", "Job name" }
                input {
                    id: "job-name",
                    r#type: "text",
                    value: "{job_name}",
                    oninput: move |e| form.write().job_name = e.value(),
                }

                label { r#for: "input-file", "Input file ID" }
                input {
                    id: "input-file",
                    r#type: "text",
                    placeholder: "ID of an uploaded data file",
                    value: "{input_file_id}",
                    oninput: move |e| form.write().input_file_id = e.value(),
                }

                match kind {
                    JobKind::Clustering => rsx! {
                        label { r#for: "resolution", "Resolution" }
                        input {
                            id: "resolution",
                            r#type: "number",
                            step: "0.1",
                            value: "{resolution}",
                            oninput: move |e| form.write().resolution = e.value(),
                        }
                        label { r#for: "n-pcs", "Principal components" }
                        input {
                            id: "n-pcs",
                            r#type: "number",
                            step: "1",
                            value: "{n_pcs}",
                            oninput: move |e| form.write().n_pcs = e.value(),
                        }
                    },
                    JobKind::Annotation => rsx! {
                        label { r#for: "reference", "Reference dataset" }
                        input {
                            id: "reference",
                            r#type: "text",
                            placeholder: "Server default",
                            value: "{reference_dataset}",
                            oninput: move |e| form.write().reference_dataset = e.value(),
                        }
                    },
                    JobKind::DifferentialExpression => rsx! {
                        label { r#for: "group1", "Group 1" }
                        input {
                            id: "group1",
                            r#type: "text",
                            placeholder: "Comma-separated cell groups",
                            value: "{group1}",
                            oninput: move |e| form.write().group1 = e.value(),
                        }
                        label { r#for: "group2", "Group 2" }
                        input {
                            id: "group2",
                            r#type: "text",
                            placeholder: "Comma-separated cell groups",
                            value: "{group2}",
                            oninput: move |e| form.write().group2 = e.value(),
                        }
                        label { r#for: "test-method", "Test method" }
                        input {
                            id: "test-method",
                            r#type: "text",
                            value: "{test_method}",
                            oninput: move |e| form.write().test_method = e.value(),
                        }
                    },
                }

                if let Some(message) = error() {
                    p { class: "error-text", "{message}" }
                }
                button {
                    class: "button",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Submitting..." } else { "Start analysis" }
                }
            }
        }
    }
}
