// HTTP routes: aggregate reads and container operations

mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::runtime::ContainerControl;
use crate::store::AggregateStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<AggregateStore>,
    pub(crate) runtime: Arc<dyn ContainerControl>,
}

pub fn app(store: Arc<AggregateStore>, runtime: Arc<dyn ContainerControl>) -> Router {
    let state = AppState { store, runtime };
    Router::new()
        .route("/", get(|| async { "Hello from ctrstats!" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/containers", get(http::list_handler)) // GET /api/containers
        .route("/api/containers/stats", get(http::stats_handler)) // GET /api/containers/stats
        .route("/api/containers/{name}/logs", get(http::logs_handler))
        .route("/api/containers/{name}/restart", post(http::restart_handler))
        .route("/api/containers/{name}/stop", post(http::stop_handler))
        .route("/api/images/{name}/version", get(http::image_version_handler))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
