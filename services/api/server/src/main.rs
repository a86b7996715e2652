use anyhow::Context;
use weather_api::shutdown::listen_for_shutdown_signals;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

fn main() {
    let config = match weather_api::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    // Kept alive for the whole process so buffered events are flushed on exit
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: weather_api::VERSION.map(Into::into),
                ..Default::default()
            },
        ))
    });

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to build tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        if let Err(e) = setup(config).await {
            tracing::error!("Fatal error during setup: {e:#}");
            std::process::exit(1);
        }
    });
}

async fn setup(config: weather_api::Config) -> anyhow::Result<()> {
    let filter_layer = match config.rust_log.as_deref() {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info")),
    }
    .map_err(|e| anyhow::anyhow!(e))
    .context("Failed to initialize tracing filter")?;

    let use_json = config.log_format != "pretty";

    if use_json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_target(true)
            .with_level(true)
            .json();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(true)
            .pretty();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    };

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        history_file = %config.history_file_path,
        static_dir = %config.static_dir,
        "Starting weather-api service at: {addr}"
    );

    let app_state = weather_api::AppState::from_config(config)
        .context("Failed to build application state")?;
    let shutdown = app_state.shutdown.clone();
    let app = weather_api::app(app_state);

    // Spawn shutdown signal handler
    let shutdown_handle = shutdown.clone();
    tokio::spawn(async move {
        listen_for_shutdown_signals().await;
        shutdown_handle.shutdown().await;
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
        .await
        .context("Server exited with error")?;

    Ok(())
}
