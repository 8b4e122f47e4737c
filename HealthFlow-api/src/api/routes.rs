use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{blood_pressure, health, profile};
use crate::api::state::AppState;
use crate::config::ApiConfig;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(config: ApiConfig) -> Router {
    debug!("Creating application router");

    let cors = config.cors_layer();
    let state = AppState::new(config);

    // Stateless analysis endpoints
    let api_routes = Router::new()
        .route("/bloodpressure/classify", post(blood_pressure::classify_reading))
        .route("/bloodpressure/analysis", post(blood_pressure::analyze_readings))
        .route("/profile/bmi", post(profile::calculate_bmi_handler));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state);

    debug!("API routes nested");

    let app = add_swagger_ui(app)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
