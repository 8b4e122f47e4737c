use serde::{Deserialize, Serialize};

use super::analysis::{LongTermProgress, TrendResult};
use super::blood_pressure::{BloodPressureCategory, BloodPressureReading};

/// Card for the most recent reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestReadingCard {
    pub reading: BloodPressureReading,
    pub category: BloodPressureCategory,
    pub tip: String,
}

/// Line chart data, oldest reading first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Reading dates formatted as `YYYY-MM-DD`
    pub labels: Vec<String>,
    pub systolic: Vec<u16>,
    pub diastolic: Vec<u16>,
}

/// One row of the history table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub reading: BloodPressureReading,
    pub category: BloodPressureCategory,
}

/// Everything the dashboard renders, derived from one reading list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Absent when there are no readings
    pub latest: Option<LatestReadingCard>,
    pub trend: TrendResult,
    pub progress: LongTermProgress,
    pub progress_narrative: String,
    pub chart: ChartSeries,
    /// Most-recent-first
    pub history: Vec<HistoryEntry>,
}
