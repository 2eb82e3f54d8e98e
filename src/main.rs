use pesqueiro::app::App;
use pesqueiro::config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let config_file = config::load_default();
    let log_filter = config_file
        .as_ref()
        .map(|file| file.log_filter().to_string())
        .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = &config_file {
        tracing::error!(error = %format!("{err:#}"), "failed to load config");
    }

    let mut desktop = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Pesqueiros"));
    match config::default_webview_data_dir() {
        Ok(dir) => desktop = desktop.with_data_directory(dir),
        Err(err) => tracing::warn!(error = %format!("{err:#}"), "using the default webview data dir"),
    }

    dioxus::LaunchBuilder::desktop().with_cfg(desktop).launch(App);
}
