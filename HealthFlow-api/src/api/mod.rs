pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;

use crate::config::ApiConfig;

/// Create the application router
pub fn create_application(config: ApiConfig) -> Router {
    routes::create_app(config)
}
