mod backend;
mod frontend;
use crate::backend::api::ApiClient;
use crate::backend::utils::config::AppConfig;
use crate::backend::utils::route::Route;
use crate::frontend::services::context::AuthState;
use dioxus::LaunchBuilder;
use dioxus::prelude::*;
use dioxus_desktop::{Config, LogicalSize, WindowBuilder};
use dioxus_router::Router;

fn main() {
    // Logging setup
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load settings, using defaults: {e:#}");
        AppConfig::default()
    });

    let client = match ApiClient::new(&config.api) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create API client: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Using API at {}", client.base_url());

    let size = LogicalSize::new(config.window.width, config.window.height);

    let desktop = Config::default()
        .with_window(
            WindowBuilder::new()
                .with_title(config.window.title.clone())
                .with_inner_size(size)
                .with_min_inner_size(LogicalSize::new(960.0, 640.0)),
        )
        .with_menu(None);

    LaunchBuilder::new()
        .with_cfg(desktop)
        .with_context(config)
        .with_context(client)
        .launch(AppRoot);
}

#[component]
fn AppRoot() -> Element {
    let client = use_context::<ApiClient>();
    let auth = use_context_provider(|| AuthState::new(client));

    // Resolve the saved session once at startup
    use_future(move || {
        let mut auth = auth.clone();
        async move { auth.restore().await }
    });

    rsx! { Router::<Route> {} }
}
