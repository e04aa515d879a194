//! ChemFlow Server, the chemical-configuration request and approval
//! tracker.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::EnvFilter;

use chemflow_core::config::AppConfig;
use chemflow_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("CHEMFLOW_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber from the logging config section.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Connect, migrate, wire services, and serve until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    let pool = chemflow_database::connection::DatabasePool::connect(&config.database)
        .await?
        .into_pool();

    chemflow_database::migration::run_migrations(&pool).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = chemflow_api::AppState::build(config, pool).await?;
    let app = chemflow_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;

    tracing::info!(address = %bind_addr, "ChemFlow server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))
}

/// Resolve when the process receives a termination signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut signal) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            signal.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
