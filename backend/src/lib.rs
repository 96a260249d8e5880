pub mod error;
pub mod handlers;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::store::TaskStore;

pub type SharedStore = Arc<dyn TaskStore>;

/// Builds the task API router over any store implementation. The built
/// frontend is served as the fallback so the SPA and API share an origin.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .fallback_service(ServeDir::new("frontend/dist"))
        .layer(CorsLayer::permissive())
        .with_state(store)
}
