use std::fmt;

use serde::{Deserialize, Serialize};

use super::blood_pressure::{BloodPressureAverage, KIDNEY_RISK_DIASTOLIC, KIDNEY_RISK_SYSTOLIC};

/// Short-term direction of change between the two most recent readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodPressureTrend {
    Stable,
    Improving,
    Worsening,
    Fluctuating,
    /// Fewer than two readings. `determine_trend` never yields this.
    InsufficientData,
}

impl BloodPressureTrend {
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureTrend::Stable => "Stable",
            BloodPressureTrend::Improving => "Improving",
            BloodPressureTrend::Worsening => "Worsening",
            BloodPressureTrend::Fluctuating => "Fluctuating",
            BloodPressureTrend::InsufficientData => "Not enough data",
        }
    }
}

impl fmt::Display for BloodPressureTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kidney strain flag derived from the recent rolling average
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum KidneyRisk {
    /// Average at or above 130 systolic or 80 diastolic
    Elevated { average: BloodPressureAverage },
    Acceptable { average: BloodPressureAverage },
}

impl KidneyRisk {
    pub fn is_elevated(&self) -> bool {
        matches!(self, KidneyRisk::Elevated { .. })
    }

    /// The average the flag was computed from
    pub fn average(&self) -> BloodPressureAverage {
        match self {
            KidneyRisk::Elevated { average } | KidneyRisk::Acceptable { average } => *average,
        }
    }

    pub fn message(&self) -> String {
        match self {
            KidneyRisk::Elevated { .. } => format!(
                "⚠️ Higher kidney strain likely (avg ≥ {}/{}). Consult your doctor.",
                KIDNEY_RISK_SYSTOLIC, KIDNEY_RISK_DIASTOLIC
            ),
            KidneyRisk::Acceptable { .. } => {
                "✅ Good! Your recent average suggests kidney pressure is being managed.".to_string()
            }
        }
    }
}

/// Combined short-term analysis shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Trend between the latest and previous reading
    pub trend: BloodPressureTrend,

    /// Kidney risk, absent when there was not enough data for a trend
    pub kidney_risk: Option<KidneyRisk>,

    /// Kidney risk as display text ("—" without data)
    pub risk_message: String,

    /// Advice matching the trend and the latest category
    pub narrative: String,
}

/// Comparison of the earlier and recent three-reading windows within the six most
/// recent readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LongTermProgress {
    /// Fewer than six readings
    InsufficientData,
    Improving {
        earlier: BloodPressureAverage,
        recent: BloodPressureAverage,
    },
    Worsening {
        earlier: BloodPressureAverage,
        recent: BloodPressureAverage,
    },
    StableHealthy { overall: BloodPressureAverage },
    StableElevated { overall: BloodPressureAverage },
    /// Moved by more than the tolerance on one axis without a clear direction
    Fluctuating {
        earlier: BloodPressureAverage,
        recent: BloodPressureAverage,
    },
}

impl LongTermProgress {
    pub fn narrative(&self) -> String {
        match self {
            LongTermProgress::InsufficientData => {
                "Add at least 6 readings for a long-term progress report.".to_string()
            }
            LongTermProgress::Improving { earlier, recent } => format!(
                "✅ Great progress! Your average BP has dropped from {} to {}.",
                earlier, recent
            ),
            LongTermProgress::Worsening { earlier, recent } => format!(
                "🚨 Your average BP has risen from {} to {}. Please consult your doctor.",
                earlier, recent
            ),
            LongTermProgress::StableHealthy { overall } => format!(
                "✅ Your BP is stable and in a healthy range ({} avg). Keep up the good work!",
                overall
            ),
            LongTermProgress::StableElevated { overall } => format!(
                "⚠️ Your BP is stable but remains elevated ({} avg). Continue to monitor closely.",
                overall
            ),
            LongTermProgress::Fluctuating { .. } => {
                "Your BP is fluctuating. Try to maintain a consistent lifestyle and medication schedule."
                    .to_string()
            }
        }
    }
}

impl fmt::Display for LongTermProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.narrative())
    }
}
