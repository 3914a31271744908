//! Statistic card.

use crate::frontend::services::states::StatCardModel;
use dioxus::prelude::*;

#[component]
pub fn StatCard(card: StatCardModel) -> Element {
    let StatCardModel {
        title,
        value,
        icon,
        color,
    } = card;

    rsx! {
        div { class: color.class(),
            div {
                p { class: "stat-title", "{title}" }
                p { class: "stat-value", "{value}" }
            }
            span { class: "stat-icon", "{icon}" }
        }
    }
}
