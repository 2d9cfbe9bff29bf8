use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::BackendClient;
use crate::storage::FieldStore;

pub mod routes;

/// Server state.
///
/// The store sits behind a mutex: reads are cheap full scans, and the mutex
/// is what serializes mutating calls for the single-logical-writer model.
pub struct AppState {
    pub store: Mutex<FieldStore>,
    pub backend: BackendClient,
}

pub async fn start_server(
    port: u16,
    database_path: PathBuf,
    backend_url: String,
) -> anyhow::Result<()> {
    let store = FieldStore::open(&database_path)?;
    let state = Arc::new(AppState {
        store: Mutex::new(store),
        backend: BackendClient::new(backend_url),
    });

    let app = Router::new()
        .route("/search", get(routes::search))
        .route("/count", get(routes::count))
        .route("/stats", get(routes::stats))
        .route("/import", post(routes::import))
        .route("/chat", post(routes::chat))
        .route("/map", post(routes::map_fields))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting explorer API on {}", addr);
    println!("🌍 Explorer API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
