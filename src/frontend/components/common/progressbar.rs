//! Progressbar component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct JobProgressProps {
    pub percent: u8,
    #[props(default)]
    pub step: Option<String>,
}

#[component]
pub fn JobProgress(props: JobProgressProps) -> Element {
    let JobProgressProps { percent, step } = props;

    rsx! {
        div {
            div { class: "progress-track",
                div { class: "progress-fill", style: "--progress-width: {percent}%" }
            }
            p { class: "muted",
                "{percent}%"
                if let Some(step) = step {
                    " · {step}"
                }
            }
        }
    }
}
