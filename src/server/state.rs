use std::sync::Arc;

use crate::storage::EdgeStore;
use crate::RouteGraph;

pub struct AppState<S: EdgeStore> {
    pub graph: Arc<RouteGraph<S>>,
}

impl<S: EdgeStore> AppState<S> {
    pub fn new(graph: Arc<RouteGraph<S>>) -> Self {
        Self { graph }
    }
}

// Manual impl: the store itself need not be Clone.
impl<S: EdgeStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { graph: Arc::clone(&self.graph) }
    }
}
