use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body mass index in kg/m², or `None` unless both inputs are positive
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 || !height_cm.is_finite() || !weight_kg.is_finite() {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// BMI band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiStatus {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiStatus::Underweight
        } else if bmi < 25.0 {
            BmiStatus::Normal
        } else if bmi < 30.0 {
            BmiStatus::Overweight
        } else {
            BmiStatus::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "Underweight",
            BmiStatus::Normal => "Normal",
            BmiStatus::Overweight => "Overweight",
            BmiStatus::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user's profile.
///
/// BMI is derived from height and weight and has no setter; it changes only
/// through [`Profile::update_measurements`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub gender: String,
    height_cm: f64,
    weight_kg: f64,
    bmi: Option<f64>,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        age: u8,
        gender: impl Into<String>,
        height_cm: f64,
        weight_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
            height_cm,
            weight_kg,
            bmi: calculate_bmi(height_cm, weight_kg),
        }
    }

    /// Change height and weight, recomputing BMI
    pub fn update_measurements(&mut self, height_cm: f64, weight_kg: f64) {
        self.height_cm = height_cm;
        self.weight_kg = weight_kg;
        self.bmi = calculate_bmi(height_cm, weight_kg);
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn bmi(&self) -> Option<f64> {
        self.bmi
    }

    pub fn bmi_status(&self) -> Option<BmiStatus> {
        self.bmi.map(BmiStatus::from_bmi)
    }
}

/// Request payload for saving a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(range(min = 1, max = 130, message = "Age must be between 1 and 130"))]
    pub age: u8,

    #[validate(length(min = 1, max = 50, message = "Gender is required"))]
    pub gender: String,

    #[validate(range(min = 50.0, max = 272.0, message = "Height must be between 50 and 272 cm"))]
    pub height_cm: f64,

    #[validate(range(min = 2.0, max = 650.0, message = "Weight must be between 2 and 650 kg"))]
    pub weight_kg: f64,
}

impl UpdateProfileRequest {
    /// Copy of the request with surrounding whitespace removed from text fields
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            gender: self.gender.trim().to_string(),
            ..self.clone()
        }
    }

    pub fn into_profile(self) -> Profile {
        Profile::new(self.name, self.age, self.gender, self.height_cm, self.weight_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi() {
        let bmi = calculate_bmi(170.0, 70.0).unwrap();
        assert!((bmi - 24.22).abs() < 0.1);

        let bmi = calculate_bmi(170.0, 85.0).unwrap();
        assert!((bmi - 29.41).abs() < 0.1);

        assert_eq!(calculate_bmi(0.0, 70.0), None);
        assert_eq!(calculate_bmi(170.0, 0.0), None);
    }

    #[test]
    fn test_bmi_status_bands() {
        assert_eq!(BmiStatus::from_bmi(18.0), BmiStatus::Underweight);
        assert_eq!(BmiStatus::from_bmi(18.5), BmiStatus::Normal);
        assert_eq!(BmiStatus::from_bmi(24.0), BmiStatus::Normal);
        assert_eq!(BmiStatus::from_bmi(25.0), BmiStatus::Overweight);
        assert_eq!(BmiStatus::from_bmi(28.0), BmiStatus::Overweight);
        assert_eq!(BmiStatus::from_bmi(32.0), BmiStatus::Obese);
    }

    #[test]
    fn test_bmi_follows_measurements() {
        let mut profile = Profile::new("Sam", 52, "Male", 180.0, 75.0);
        assert_eq!(profile.bmi_status(), Some(BmiStatus::Normal));

        profile.update_measurements(180.0, 100.0);
        assert_eq!(profile.weight_kg(), 100.0);
        assert!((profile.bmi().unwrap() - 30.86).abs() < 0.01);
        assert_eq!(profile.bmi_status(), Some(BmiStatus::Obese));
    }

    #[test]
    fn test_bmi_just_over_band_edge_is_overweight() {
        // 81 / 1.8^2 lands a hair above 25.0 in floating point
        let profile = Profile::new("Sam", 52, "Male", 180.0, 81.0);
        assert!(profile.bmi().unwrap() >= 25.0);
        assert_eq!(profile.bmi_status(), Some(BmiStatus::Overweight));
    }

    #[test]
    fn test_profile_request_validation() {
        let request = UpdateProfileRequest {
            name: "  Sam  ".to_string(),
            age: 52,
            gender: "Male".to_string(),
            height_cm: 180.0,
            weight_kg: 81.0,
        };
        let normalized = request.normalized();
        assert_eq!(normalized.name, "Sam");
        assert!(normalized.validate().is_ok());

        let blank = UpdateProfileRequest { name: "   ".to_string(), ..request.clone() }.normalized();
        assert!(blank.validate().is_err());

        let tall = UpdateProfileRequest { height_cm: 400.0, ..request };
        assert!(tall.validate().is_err());
    }
}
