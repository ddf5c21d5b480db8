// Tour Explorer - travel discovery client
//
// - Faceted tourism search driven by the type-filter page location
// - Content details with type-specific info
// - Accounts with stored token pairs and expiry watching
// - AI day-by-day trip plans

use clap::Parser;

// Request logging macros - exported for use by other modules
#[macro_use]
pub mod macros;

pub mod api;
pub mod auth;
pub mod browse;
pub mod cli;
pub mod codes;
pub mod config;
pub mod database;
pub mod detail;
pub mod facets;
pub mod filter;
pub mod models;
pub mod planner;
pub mod search;
pub mod state;

use cli::Cli;
use config::AppConfig;
use state::AppState;

pub fn run() {
    // Initialize env_logger to output to stderr (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.session.data_dir = dir;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(async move {
        let state = AppState::init(config)?;
        log::info!("Tour Explorer starting...");

        // Restore the stored session; starts the expiry watcher when signed in
        if state.session.check_auth_status().await {
            log::info!("Restored session for {:?}", state.session.state().user_id);
        }

        cli::execute(cli.command, &state).await
    });

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
