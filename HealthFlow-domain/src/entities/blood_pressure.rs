use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};
use validator::Validate;

use crate::validation::validate_not_in_future;

// KDIGO-aligned thresholds, in mmHg
pub const SYSTOLIC_NORMAL: u16 = 120;
pub const DIASTOLIC_NORMAL: u16 = 80;
pub const SYSTOLIC_ELEVATED: u16 = 130;
pub const SYSTOLIC_STAGE1: u16 = 140;
pub const DIASTOLIC_STAGE1: u16 = 90;
pub const KIDNEY_RISK_SYSTOLIC: u16 = 130;
pub const KIDNEY_RISK_DIASTOLIC: u16 = 80;

/// Domain model for a blood pressure reading.
///
/// Readings are never edited after creation. Lists of readings are kept
/// most-recent-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Pulse rate in beats per minute
    pub pulse: u16,

    /// Calendar date the reading was taken on
    pub date: NaiveDate,

    /// Local time of day the reading was taken at
    pub time: NaiveTime,
}

impl BloodPressureReading {
    /// Create a reading
    pub fn new(systolic: u16, diastolic: u16, pulse: u16, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            systolic,
            diastolic,
            pulse,
            date,
            time,
        }
    }
}

/// Request payload for recording a new blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBloodPressureRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    pub diastolic: u16,

    /// Pulse rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "Pulse must be between 20 and 250"))]
    pub pulse: u16,

    /// Date of the reading
    #[validate(custom = "validate_not_in_future")]
    pub date: NaiveDate,

    /// Local time of the reading
    pub time: NaiveTime,
}

impl CreateBloodPressureRequest {
    /// Turn an already validated request into a reading
    pub fn into_reading(self) -> BloodPressureReading {
        BloodPressureReading::new(self.systolic, self.diastolic, self.pulse, self.date, self.time)
    }
}

/// Blood pressure category of a single reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodPressureCategory {
    /// systolic < 120 and diastolic < 80
    Normal,

    /// systolic < 130 and diastolic < 80
    Elevated,

    /// systolic < 140 or diastolic < 90
    Stage1Hypertension,

    /// Everything else
    Stage2Hypertension,
}

impl BloodPressureCategory {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Stage1Hypertension => "Stage 1 Hypertension",
            BloodPressureCategory::Stage2Hypertension => "Stage 2 Hypertension",
        }
    }

    /// Advice shown next to a reading in this category
    pub fn tip(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => {
                "✅ Excellent! Well-controlled BP is key for kidney health. Keep up the great work."
            }
            BloodPressureCategory::Elevated => {
                "⚠️ Slightly elevated. A good time to focus on lifestyle changes like reducing salt."
            }
            BloodPressureCategory::Stage1Hypertension => {
                "⚠️ BP in mild hypertension range. Consistent monitoring and lifestyle adjustments are important."
            }
            BloodPressureCategory::Stage2Hypertension => {
                "🚨 High BP. Please consult your doctor to manage this, as high BP can accelerate kidney damage."
            }
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rounded mean systolic and diastolic values of a group of readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureAverage {
    pub systolic: u16,
    pub diastolic: u16,
}

impl BloodPressureAverage {
    pub fn new(systolic: u16, diastolic: u16) -> Self {
        Self { systolic, diastolic }
    }
}

impl fmt::Display for BloodPressureAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn request(systolic: u16, diastolic: u16, pulse: u16, date: NaiveDate) -> CreateBloodPressureRequest {
        CreateBloodPressureRequest {
            systolic,
            diastolic,
            pulse,
            date,
            time: NaiveTime::from_hms_opt(7, 45, 0).unwrap(),
        }
    }

    #[test]
    fn test_range_validation() {
        let today = Local::now().date_naive();

        assert!(request(120, 80, 72, today).validate().is_ok());
        assert!(request(350, 80, 72, today).validate().is_err());
        assert!(request(120, 10, 72, today).validate().is_err());
        assert!(request(120, 80, 300, today).validate().is_err());
    }

    #[test]
    fn test_future_date_is_rejected() {
        let tomorrow = Local::now().date_naive() + Duration::days(2);
        let errors = request(120, 80, 72, tomorrow).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("date"));
    }

    #[test]
    fn test_into_reading_keeps_every_field() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let reading = request(128, 79, 66, date).into_reading();
        assert_eq!(reading.systolic, 128);
        assert_eq!(reading.diastolic, 79);
        assert_eq!(reading.pulse, 66);
        assert_eq!(reading.date, date);
        assert_eq!(reading.time, NaiveTime::from_hms_opt(7, 45, 0).unwrap());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(BloodPressureCategory::Normal.to_string(), "Normal");
        assert_eq!(BloodPressureCategory::Stage1Hypertension.to_string(), "Stage 1 Hypertension");
        assert_eq!(BloodPressureCategory::Stage2Hypertension.label(), "Stage 2 Hypertension");
        assert!(BloodPressureCategory::Stage2Hypertension.tip().contains("consult your doctor"));
    }

    #[test]
    fn test_average_display() {
        assert_eq!(BloodPressureAverage::new(125, 82).to_string(), "125/82");
    }
}
