use std::sync::Arc;

use marquee_api::config::ApiConfig;
use marquee_api::routes;
use marquee_api::seed::load_seed;
use marquee_api::state::AppState;
use marquee_service::{PipelineStore, QueryService};
use marquee_store::MemoryStore;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    });

    let store = MemoryStore::new();
    if let Some(path) = &config.seed_path {
        match load_seed(&store, path) {
            Ok(total) => tracing::info!(path = %path.display(), total, "seed loaded"),
            Err(e) => {
                eprintln!("failed to load seed {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    let store: Arc<dyn PipelineStore> = Arc::new(store);
    let service = QueryService::new(store).with_collections(config.collections.clone());

    let state = AppState {
        service: Arc::new(service),
        request_timeout: config.request_timeout,
    };

    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {}: {e}", config.bind_addr);
            std::process::exit(1);
        });

    tracing::info!("marquee-api listening on {}", config.bind_addr);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
