use std::sync::Arc;

use crate::config::ApiConfig;

/// Shared, read-only state for the handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
