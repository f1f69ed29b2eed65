mod action;
mod animation;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod gemini;
mod theme;
mod widgets;

use std::sync::Arc;

use lumina_core::catalog::Catalog;
use lumina_core::chat::ChatBackend;
use lumina_core::config::Config;
use lumina_core::content::GITHUB_USERNAME;
use lumina_core::contributions::ContributionCalendar;
use lumina_core::layout::LayoutConfig;
use lumina_core::platform;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("lumina log: {}", log_path.display());

    info!("lumina starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    // ── Catalog + layout table ───────────────────────────────────────────────
    let catalog = Catalog::builtin();
    let mut layout = LayoutConfig::load_or_builtin(&platform::layout_path());
    let warnings: Vec<String> = layout
        .validate(&catalog)
        .iter()
        .map(ToString::to_string)
        .collect();

    // ── Chat backend (absent without an API key) ─────────────────────────────
    let backend: Option<Arc<dyn ChatBackend>> = match config.chat.api_key() {
        Some(key) => match gemini::GeminiBackend::new(&config.chat, key) {
            Ok(b) => {
                info!(model = %config.chat.model, "chat: gemini backend ready");
                Some(Arc::new(b))
            }
            Err(e) => {
                warn!("chat: backend setup failed: {}", e);
                None
            }
        },
        None => {
            info!("chat: ${} not set, chat disabled", config.chat.api_key_env);
            None
        }
    };

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let state = app_state::AppState::new(
        catalog,
        layout,
        config.grid.spec(),
        config.grid.gap,
        backend.is_some(),
        ContributionCalendar::mock(GITHUB_USERNAME),
    );
    let app = app::App::new(state, backend, &config.ui, warnings);
    app.run().await?;

    Ok(())
}
