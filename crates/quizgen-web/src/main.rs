use std::net::SocketAddr;
use std::sync::Arc;

mod error;
mod handlers;
mod state;
mod template;
mod upload;


use quizgen_core::{Config, GeminiBackend, QuestionGenerator};
use state::AppState;

/// Build the application router over shared state. Kept separate from
/// `main` so router-level tests can drive it with a mock backend.
fn router(state: Arc<AppState>) -> axum::Router {
    let body_limit =
        axum::extract::DefaultBodyLimit::max(state.config.max_upload_mb * 1024 * 1024);

    axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route("/generate", axum::routing::post(handlers::generate::generate))
        .route(
            "/download/{filename}",
            axum::routing::get(handlers::download::download),
        )
        .layer(body_limit)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    std::fs::create_dir_all(&config.upload_dir)?;
    std::fs::create_dir_all(&config.results_dir)?;

    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }
    tracing::info!(
        model = %config.model,
        upload_dir = %config.upload_dir.display(),
        results_dir = %config.results_dir.display(),
        "starting quizgen-web"
    );

    let backend = Arc::new(GeminiBackend::from_config(&config));
    let generator = QuestionGenerator::new(backend, config.timeout);
    let state = Arc::new(AppState { config, generator });

    let app = router(state).layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], 5000));
    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
