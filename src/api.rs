use axum::{extract::State, routing::get, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::{StatusRecord, StatusTracker};

pub async fn get_status(State(state): State<Arc<Mutex<StatusTracker>>>) -> Json<Vec<StatusRecord>> {
    let tracker = state.lock().await;
    Json(tracker.snapshot())
}

pub fn create_router(state: Arc<Mutex<StatusTracker>>) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .with_state(state)
}

pub async fn start_server(port: u16, state: Arc<Mutex<StatusTracker>>) {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Status API: http://localhost:{}", addr.port());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind API port");
    axum::serve(listener, app).await.unwrap();
}
