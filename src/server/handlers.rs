//! Request handlers.
//!
//! Query computation (closure, Dijkstra) runs on the blocking pool so a
//! large graph never stalls the async workers.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::task;

use crate::model::{EdgeRecord, Matrix};
use crate::storage::EdgeStore;
use crate::Error;

use super::{error::HttpError, state::AppState};

/// `?origen=...&destino=...`
#[derive(Debug, Default, Deserialize)]
pub struct PairQuery {
    pub origen: Option<String>,
    pub destino: Option<String>,
}

impl PairQuery {
    /// Both names, or `MissingParameter` if either is absent or empty.
    fn into_pair(self) -> Result<(String, String), Error> {
        let origin = self.origen.filter(|s| !s.is_empty()).ok_or_else(|| Error::MissingParameter("origen".into()))?;
        let destination = self.destino.filter(|s| !s.is_empty()).ok_or_else(|| Error::MissingParameter("destino".into()))?;
        Ok((origin, destination))
    }
}

#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub success: bool,
    pub count: usize,
    pub lugares: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectivityResponse {
    pub success: bool,
    pub conectado: bool,
    pub origen: String,
    pub destino: String,
    pub conexion_directa: bool,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub success: bool,
    pub origen: String,
    pub destino: String,
    pub distancia: f64,
    pub camino: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub success: bool,
    pub origen: String,
    pub destino: String,
    pub distancia: f64,
    pub adyacente: bool,
}

#[derive(Debug, Serialize)]
pub struct MatricesResponse {
    pub success: bool,
    pub lugares: Vec<String>,
    pub matriz_adyacencia: Matrix<u8>,
    pub matriz_distancias: Matrix<f64>,
    pub matriz_conectividad: Matrix<u8>,
}

#[derive(Debug, Serialize)]
pub struct EdgesResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub generation: u64,
    pub count: usize,
}

async fn run_blocking<T, F>(f: F) -> Result<T, HttpError>
where
    F: FnOnce() -> Result<T, HttpError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| HttpError::InternalError(format!("query task failed: {e}")))?
}

pub async fn home() -> &'static str {
    "city-graph route service is running"
}

pub async fn health<S: EdgeStore>(State(state): State<AppState<S>>) -> Json<Value> {
    let snap = state.graph.snapshot();
    Json(json!({
        "status": "healthy",
        "service": "city-graph",
        "version": env!("CARGO_PKG_VERSION"),
        "generation": snap.generation(),
        "places": snap.place_count(),
        "loaded_at": snap.loaded_at(),
    }))
}

pub async fn places<S: EdgeStore>(State(state): State<AppState<S>>) -> Json<PlacesResponse> {
    let lugares = state.graph.places();
    Json(PlacesResponse { success: true, count: lugares.len(), lugares })
}

pub async fn connectivity<S: EdgeStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PairQuery>,
) -> Result<Json<ConnectivityResponse>, HttpError> {
    let (origen, destino) = params.into_pair()?;
    run_blocking(move || {
        let link = state.graph.connectivity(&origen, &destino)?;
        Ok(Json(ConnectivityResponse {
            success: true,
            conectado: link.connected,
            origen,
            destino,
            conexion_directa: link.direct_edge,
        }))
    })
    .await
}

pub async fn shortest_route<S: EdgeStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PairQuery>,
) -> Result<Json<RouteResponse>, HttpError> {
    let (origen, destino) = params.into_pair()?;
    run_blocking(move || {
        let route = state.graph.require_route(&origen, &destino)?;
        Ok(Json(RouteResponse {
            success: true,
            origen,
            destino,
            distancia: route.distance_km,
            camino: route.places,
        }))
    })
    .await
}

pub async fn direct_distance<S: EdgeStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<PairQuery>,
) -> Result<Json<DistanceResponse>, HttpError> {
    let (origen, destino) = params.into_pair()?;
    let edge = state.graph.direct_distance(&origen, &destino)?;
    Ok(Json(DistanceResponse {
        success: true,
        origen,
        destino,
        distancia: edge.distance_km,
        adyacente: edge.adjacent,
    }))
}

pub async fn matrices<S: EdgeStore>(State(state): State<AppState<S>>) -> Result<Json<MatricesResponse>, HttpError> {
    let snap = state.graph.snapshot();
    run_blocking(move || {
        Ok(Json(MatricesResponse {
            success: true,
            lugares: snap.places().to_vec(),
            matriz_adyacencia: snap.adjacency().map(|&a| u8::from(a)),
            matriz_distancias: snap.distances().clone(),
            matriz_conectividad: snap.closure().map(|&c| u8::from(c)),
        }))
    })
    .await
}

pub async fn edges<S: EdgeStore>(State(state): State<AppState<S>>) -> Result<Json<EdgesResponse>, HttpError> {
    let data = state.graph.edges().await?;
    Ok(Json(EdgesResponse { success: true, count: data.len(), data }))
}

pub async fn reload<S: EdgeStore>(State(state): State<AppState<S>>) -> Result<Json<ReloadResponse>, HttpError> {
    let snap = state.graph.reload().await?;
    Ok(Json(ReloadResponse {
        success: true,
        generation: snap.generation(),
        count: snap.place_count(),
    }))
}
