//! HTTP route service.
//!
//! JSON endpoints over a shared [`RouteGraph`]. Field names follow the wire
//! format existing clients already speak (`lugares`, `conectado`,
//! `camino`, ...).
//!
//! | Method | Path | Answers |
//! |--------|------|---------|
//! | GET | `/` | liveness banner |
//! | GET | `/health` | status and snapshot generation |
//! | GET | `/api/lugares` | place list |
//! | GET | `/api/conectividad` | reachability + direct edge |
//! | GET | `/api/camino-minimo` | shortest route |
//! | GET | `/api/distancia` | direct edge distance |
//! | GET | `/api/matrices` | full matrices (debugging) |
//! | GET | `/api/conexiones` | raw edge records |
//! | POST | `/api/recargar` | reload from the store |

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::storage::EdgeStore;
use crate::{Result, RouteGraph};

pub use error::HttpError;
pub use router::create_router;
pub use state::AppState;

/// Bind `config.bind_addr()` and serve until ctrl-c.
pub async fn serve<S: EdgeStore>(graph: Arc<RouteGraph<S>>, config: &ServerConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "route service listening");

    let app = create_router(AppState::new(graph));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
