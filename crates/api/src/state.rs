use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable; the tour itself holds no state
/// here -- each request opens and closes its own connection.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the database endpoint sources.
    pub config: Arc<ServerConfig>,
}
