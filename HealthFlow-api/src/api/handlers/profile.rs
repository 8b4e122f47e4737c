use axum::extract::{rejection::JsonRejection, Json};
use tracing::{debug, instrument};
use validator::Validate;

use health_flow_domain::entities::profile::{calculate_bmi, BmiStatus};
use health_flow_domain::validation::describe_validation_errors;

use crate::entities::common::ErrorResponse;
use crate::entities::profile::{BmiRequest, BmiResponse};

/// Calculate body mass index from height and weight
#[utoipa::path(
    post,
    path = "/api/v1/profile/bmi",
    request_body = BmiRequest,
    responses(
        (status = 200, description = "BMI and its band", body = BmiResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "profile"
)]
#[instrument(skip(payload))]
pub async fn calculate_bmi_handler(
    payload: Result<Json<BmiRequest>, JsonRejection>,
) -> Result<Json<BmiResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(|rejection| ErrorResponse::bad_request(rejection.body_text()))?;

    request.validate().map_err(|errors| {
        ErrorResponse::validation_error(describe_validation_errors(&errors), None)
    })?;

    // Validated ranges are positive, so a missing BMI means non-finite input
    let bmi = calculate_bmi(request.height_cm, request.weight_kg)
        .ok_or_else(|| ErrorResponse::bad_request("Height and weight must be positive numbers"))?;
    debug!("Calculated BMI {:.1}", bmi);

    Ok(Json(BmiResponse {
        bmi: (bmi * 10.0).round() / 10.0,
        status: BmiStatus::from_bmi(bmi).label().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bmi_is_rounded() {
        let Json(response) = calculate_bmi_handler(Ok(Json(BmiRequest { height_cm: 170.0, weight_kg: 70.0 })))
            .await
            .unwrap();

        assert_eq!(response.bmi, 24.2);
        assert_eq!(response.status, "Normal");
    }

    #[tokio::test]
    async fn test_bmi_out_of_range() {
        let err = calculate_bmi_handler(Ok(Json(BmiRequest { height_cm: 10.0, weight_kg: 70.0 })))
            .await
            .unwrap_err();
        assert!(err.message.contains("Height must be between 50 and 272 cm"));
    }
}
