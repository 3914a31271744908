//! Embedded stylesheet loading.

use std::{collections::HashMap, sync::OnceLock};

static CSS_CACHE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

pub struct ResourceLoader;

impl ResourceLoader {
    fn get_all_styles() -> HashMap<&'static str, &'static str> {
        let mut m = HashMap::new();
        macro_rules! style {
            ($n:expr, $p:expr) => {
                m.insert($n, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), $p)));
            };
        }
        style!("base", "/assets/styles/base.css");
        style!("auth", "/assets/styles/auth.css");
        style!("navigation", "/assets/styles/navigation.css");
        style!("dashboard", "/assets/styles/dashboard.css");
        style!("jobs", "/assets/styles/jobs.css");
        m
    }

    pub fn get_css(name: &str) -> &'static str {
        CSS_CACHE
            .get_or_init(Self::get_all_styles)
            .get(name)
            .copied()
            .unwrap_or("")
    }

    pub fn combine_css(styles: &[&str]) -> String {
        styles
            .iter()
            .map(|&n| Self::get_css(n))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Styles for the authenticated shell and its pages.
    pub fn get_main_css() -> String {
        Self::combine_css(&["base", "navigation", "dashboard", "jobs"])
    }

    /// Styles for the login and registration screens.
    pub fn get_auth_css() -> String {
        Self::combine_css(&["base", "auth"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stylesheet_is_empty() {
        assert_eq!(ResourceLoader::get_css("missing"), "");
    }

    #[test]
    fn main_bundle_contains_badge_styles() {
        let css = ResourceLoader::get_main_css();
        assert!(css.contains(".badge-unknown"));
        assert!(css.contains(".stat-card"));
    }
}
