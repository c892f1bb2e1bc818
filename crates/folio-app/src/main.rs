mod boot;
mod cli;
mod repl;

use std::path::Path;
use std::sync::Arc;

use folio_assistant::Theme;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Config first so its log level can seed the filter.
    let config = match args.config {
        Some(ref path) => folio_config::load_config_from(Path::new(path)),
        None => folio_config::load_config(),
    };
    let (config, config_error) = match config {
        Ok(config) => (config, None),
        Err(e) => (folio_config::FolioConfig::default(), Some(e)),
    };

    let log_directive = args
        .log_level
        .as_deref()
        .map(|level| format!("folio={level}"))
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_directive))
        .unwrap_or_else(|_| EnvFilter::new("folio=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    tracing::info!("Folio v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if args.print_config {
        println!("{}", folio_config::config_to_json(&config));
        return;
    }

    let preferences = boot::open_preferences(&config.preferences);
    if let Some(theme) = args.theme {
        let theme = match theme {
            cli::ThemeArg::Light => Theme::Light,
            cli::ThemeArg::Dark => Theme::Dark,
        };
        preferences.set_theme(theme);
    }
    tracing::info!("Theme: {}", preferences.theme());

    let credentials = boot::credential_resolver(&config.credentials, preferences);
    if let Some(ref key) = args.api_key {
        credentials.remember_override(key);
        tracing::info!("Using API key from the command line");
    }

    let manager = Arc::new(boot::build_conversation(&config, credentials));
    tracing::info!(conversation = %manager.id(), "Conversation ready");

    if let Err(e) = repl::run(manager).await {
        tracing::error!("Input loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
