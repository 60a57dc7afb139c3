// src/main.rs

use std::{net::SocketAddr, sync::Arc};

use quiz_backend::config::Config;
use quiz_backend::routes;
use quiz_backend::services::{
    QuizService,
    providers::gemini::{GeminiConfig, GeminiProvider},
};
use quiz_backend::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // One provider client for the whole process, injected through state
    let provider = GeminiProvider::new(GeminiConfig::from(&config))?;
    tracing::info!("Using Gemini model {}", config.gemini_model);

    let state = AppState {
        quiz_service: QuizService::new(Arc::new(provider), config.upstream_timeout),
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening at http://localhost:{}", config.port);

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
