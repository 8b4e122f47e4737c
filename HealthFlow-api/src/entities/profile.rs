use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for a BMI calculation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BmiRequest {
    /// Height in centimetres
    #[validate(range(min = 50.0, max = 272.0, message = "Height must be between 50 and 272 cm"))]
    #[schema(example = 170.0)]
    pub height_cm: f64,

    /// Weight in kilograms
    #[validate(range(min = 2.0, max = 650.0, message = "Weight must be between 2 and 650 kg"))]
    #[schema(example = 70.0)]
    pub weight_kg: f64,
}

/// BMI rounded to one decimal with its band
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BmiResponse {
    #[schema(example = 24.2)]
    pub bmi: f64,
    /// Underweight, Normal, Overweight or Obese
    #[schema(example = "Normal")]
    pub status: String,
}
