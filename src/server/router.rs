use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::storage::EdgeStore;

use super::{handlers, state::AppState};

pub fn create_router<S: EdgeStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health::<S>))
        .route("/api/lugares", get(handlers::places::<S>))
        .route("/api/conectividad", get(handlers::connectivity::<S>))
        .route("/api/camino-minimo", get(handlers::shortest_route::<S>))
        .route("/api/distancia", get(handlers::direct_distance::<S>))
        .route("/api/matrices", get(handlers::matrices::<S>))
        .route("/api/conexiones", get(handlers::edges::<S>))
        .route("/api/recargar", post(handlers::reload::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
