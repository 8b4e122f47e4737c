use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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
