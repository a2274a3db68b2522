pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

use crate::config;
use crate::error::AppError;
use crate::seeder;
use chrono::Utc;

/// Application entry point. Handles the `healthcheck` and `seed`
/// subcommands, otherwise loads configuration, initializes tracing and serves
/// the API.
pub async fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().collect();

    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if args.get(1).map(String::as_str) == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    let settings =
        config::get_configuration().map_err(|e| AppError::Config(e.to_string()))?;
    tracing::init_tracing(settings.log_format);
    ::tracing::info!(
        http_port = settings.http_port,
        logs_file = %settings.logs_file.display(),
        "Loaded settings"
    );

    if args.get(1).map(String::as_str) == Some("seed") {
        let count = match args.get(2) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("Invalid seed count {raw:?}: {e}")))?,
            None => seeder::DEFAULT_SEED_COUNT,
        };
        let store = state::open_store(&settings).await?;
        let records = seeder::generate_sample_logs(&mut rand::rng(), count, Utc::now());
        seeder::seed_store(store.as_ref(), records).await;
        return Ok(());
    }

    let app_state = state::AppState::from_settings(&settings).await?;
    let app = router::router(app_state.service);

    server::serve(app, settings.http_port).await
}
