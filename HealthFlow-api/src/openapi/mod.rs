use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::blood_pressure::classify_reading,
        crate::api::handlers::blood_pressure::analyze_readings,
        crate::api::handlers::profile::calculate_bmi_handler
    ),
    components(
        schemas(
            crate::api::handlers::health::HealthResponse,
            crate::entities::common::ErrorResponse,
            crate::entities::blood_pressure::PublicBloodPressureReading,
            crate::entities::blood_pressure::PublicBloodPressureCategory,
            crate::entities::blood_pressure::PublicAverage,
            crate::entities::blood_pressure::ClassifyRequest,
            crate::entities::blood_pressure::ClassifyResponse,
            crate::entities::blood_pressure::AnalysisRequest,
            crate::entities::blood_pressure::AnalysisResponse,
            crate::entities::blood_pressure::LatestReadingResponse,
            crate::entities::blood_pressure::TrendResponse,
            crate::entities::blood_pressure::KidneyRiskResponse,
            crate::entities::blood_pressure::ProgressResponse,
            crate::entities::blood_pressure::ChartResponse,
            crate::entities::blood_pressure::HistoryEntryResponse,
            crate::entities::profile::BmiRequest,
            crate::entities::profile::BmiResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "blood_pressure", description = "Blood pressure classification and trend analysis"),
        (name = "profile", description = "Body measurements")
    ),
    info(
        title = "HealthFlow API",
        version = "0.1.0",
        description = "Blood pressure classification, trend analysis and kidney risk feedback",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "HealthFlow API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "blood_pressure"));
        assert!(tags.iter().any(|tag| tag.name == "profile"));

        let paths = &openapi.paths.paths;
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/api/v1/bloodpressure/classify"));
        assert!(paths.contains_key("/api/v1/bloodpressure/analysis"));
        assert!(paths.contains_key("/api/v1/profile/bmi"));
    }

    #[test]
    fn test_schemas_are_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("AnalysisResponse"));
        assert!(schemas.contains_key("ErrorResponse"));
        assert!(schemas.contains_key("BmiRequest"));
    }
}
