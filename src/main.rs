use axum::Router;
use fitcoach_rs::{config, routes, state};
use mimalloc::MiMalloc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitcoach_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let port = config.port;
    let max_file_size = config.max_file_size;
    let cache_ttl = config.cache_ttl;
    let model = config.coach.model.clone();
    let state = state::AppState::new(config);

    // Start cache eviction task
    let eviction_state = state.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await; // Every 5 minutes
            eviction_state.evict_expired(cache_ttl);
        }
    });

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .merge(routes::ask::router())
        .merge(routes::chart::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("FitCoach-RS listening on {} (coach model: {})", addr, model);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Upload: POST http://{}/api/upload", addr);
    tracing::info!("Ask: POST http://{}/api/ask", addr);
    tracing::info!("Chart: POST http://{}/api/chart", addr);

    axum::serve(listener, app).await.unwrap();
}
