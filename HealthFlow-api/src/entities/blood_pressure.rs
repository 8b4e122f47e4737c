use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Public representation of a blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicBloodPressureReading {
    /// Systolic blood pressure (the higher number)
    #[schema(example = 128)]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[schema(example = 82)]
    pub diastolic: u16,

    /// Pulse rate in beats per minute
    #[schema(example = 70)]
    pub pulse: u16,

    /// Date of the reading (YYYY-MM-DD)
    #[schema(value_type = String, format = Date, example = "2024-06-30")]
    pub date: NaiveDate,

    /// Local time of the reading (HH:MM:SS)
    #[schema(value_type = String, example = "08:15:00")]
    pub time: NaiveTime,
}

/// Blood pressure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PublicBloodPressureCategory {
    Normal,
    Elevated,
    Stage1Hypertension,
    Stage2Hypertension,
}

/// Request payload for classifying a single measurement
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClassifyRequest {
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    #[schema(example = 135)]
    pub systolic: u16,

    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    #[schema(example = 85)]
    pub diastolic: u16,
}

/// Category of a measurement with its label and advice
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyResponse {
    pub category: PublicBloodPressureCategory,
    #[schema(example = "Stage 1 Hypertension")]
    pub label: String,
    pub tip: String,
}

/// Request payload for analyzing a reading history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Readings ordered most-recent-first
    pub readings: Vec<PublicBloodPressureReading>,
}

/// Rounded mean of a group of readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicAverage {
    pub systolic: u16,
    pub diastolic: u16,
}

/// Latest reading with its category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LatestReadingResponse {
    pub reading: PublicBloodPressureReading,
    pub category: PublicBloodPressureCategory,
    pub label: String,
    pub tip: String,
}

/// Kidney strain flag from the recent average
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KidneyRiskResponse {
    pub elevated: bool,
    pub average: PublicAverage,
}

/// Short-term trend between the two most recent readings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendResponse {
    /// Stable, Improving, Worsening, Fluctuating or Not enough data
    #[schema(example = "Improving")]
    pub trend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kidney_risk: Option<KidneyRiskResponse>,
    pub risk_message: String,
    pub narrative: String,
}

/// Long-term progress over the six most recent readings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    /// insufficient_data, improving, worsening, stable_healthy, stable_elevated or fluctuating
    #[schema(example = "improving")]
    pub status: String,
    pub narrative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earlier: Option<PublicAverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent: Option<PublicAverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<PublicAverage>,
}

/// Chart series, oldest reading first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartResponse {
    pub labels: Vec<String>,
    pub systolic: Vec<u16>,
    pub diastolic: Vec<u16>,
}

/// One row of the categorized history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub reading: PublicBloodPressureReading,
    pub category: PublicBloodPressureCategory,
    pub label: String,
}

/// Full dashboard for a reading history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestReadingResponse>,
    pub trend: TrendResponse,
    pub progress: ProgressResponse,
    pub chart: ChartResponse,
    /// Most-recent-first
    pub history: Vec<HistoryEntryResponse>,
}
