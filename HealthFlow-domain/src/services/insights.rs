//! Blood pressure classification and trend rules.
//!
//! Every function here is pure: it reads a most-recent-first slice of readings and
//! returns a value. Missing data is reported through sentinel values, never errors.

use crate::entities::analysis::{BloodPressureTrend, KidneyRisk, LongTermProgress, TrendResult};
use crate::entities::blood_pressure::{
    BloodPressureAverage, BloodPressureCategory, BloodPressureReading, DIASTOLIC_NORMAL,
    DIASTOLIC_STAGE1, KIDNEY_RISK_DIASTOLIC, KIDNEY_RISK_SYSTOLIC, SYSTOLIC_ELEVATED,
    SYSTOLIC_NORMAL, SYSTOLIC_STAGE1,
};

/// Minimum change in mmHg that counts as movement between two readings
pub const TREND_DELTA: i32 = 5;

/// Largest change in mmHg between windows that still counts as stable
pub const PROGRESS_TOLERANCE: i32 = 5;

/// Readings averaged for the kidney risk flag
pub const KIDNEY_RISK_WINDOW: usize = 5;

/// Readings compared by the long-term progress report
pub const LONG_TERM_WINDOW: usize = 6;

/// Readings needed for a short-term trend
pub const MIN_TREND_READINGS: usize = 2;

// Upper bounds (exclusive) of a healthy overall average in the progress report
const HEALTHY_AVERAGE_SYSTOLIC: u16 = 130;
const HEALTHY_AVERAGE_DIASTOLIC: u16 = 85;

/// Categorize a single measurement.
///
/// The Stage 1 rule is `systolic < 140 || diastolic < 90`, so a high systolic value
/// with a low diastolic value (e.g. 200/60) lands in Stage 1 rather than Stage 2.
pub fn classify(systolic: u16, diastolic: u16) -> BloodPressureCategory {
    if systolic < SYSTOLIC_NORMAL && diastolic < DIASTOLIC_NORMAL {
        BloodPressureCategory::Normal
    } else if systolic < SYSTOLIC_ELEVATED && diastolic < DIASTOLIC_NORMAL {
        BloodPressureCategory::Elevated
    } else if systolic < SYSTOLIC_STAGE1 || diastolic < DIASTOLIC_STAGE1 {
        BloodPressureCategory::Stage1Hypertension
    } else {
        BloodPressureCategory::Stage2Hypertension
    }
}

/// Categorize a reading
pub fn classify_reading(reading: &BloodPressureReading) -> BloodPressureCategory {
    classify(reading.systolic, reading.diastolic)
}

/// Compare the latest reading against the one before it
pub fn determine_trend(latest: &BloodPressureReading, previous: &BloodPressureReading) -> BloodPressureTrend {
    let delta_sys = i32::from(latest.systolic) - i32::from(previous.systolic);
    let delta_dia = i32::from(latest.diastolic) - i32::from(previous.diastolic);

    if delta_sys.abs() < TREND_DELTA && delta_dia.abs() < TREND_DELTA {
        BloodPressureTrend::Stable
    } else if delta_sys <= -TREND_DELTA && delta_dia <= -TREND_DELTA {
        BloodPressureTrend::Improving
    } else if delta_sys >= TREND_DELTA || delta_dia >= TREND_DELTA {
        BloodPressureTrend::Worsening
    } else {
        BloodPressureTrend::Fluctuating
    }
}

/// Integer division rounding halves up
fn rounded_mean(total: u64, count: u64) -> u16 {
    ((2 * total + count) / (2 * count)) as u16
}

/// Mean systolic and diastolic values, each rounded independently. Empty input is 0/0.
pub fn average_bp(readings: &[BloodPressureReading]) -> BloodPressureAverage {
    if readings.is_empty() {
        return BloodPressureAverage::default();
    }

    let count = readings.len() as u64;
    let total_sys: u64 = readings.iter().map(|r| u64::from(r.systolic)).sum();
    let total_dia: u64 = readings.iter().map(|r| u64::from(r.diastolic)).sum();

    BloodPressureAverage::new(rounded_mean(total_sys, count), rounded_mean(total_dia, count))
}

/// Flag kidney strain from the average of the most recent readings
pub fn assess_kidney_risk(readings: &[BloodPressureReading]) -> KidneyRisk {
    let recent = &readings[..readings.len().min(KIDNEY_RISK_WINDOW)];
    let average = average_bp(recent);

    if average.systolic >= KIDNEY_RISK_SYSTOLIC || average.diastolic >= KIDNEY_RISK_DIASTOLIC {
        KidneyRisk::Elevated { average }
    } else {
        KidneyRisk::Acceptable { average }
    }
}

/// Advice for a short-term trend given the latest category
pub fn trend_message(trend: BloodPressureTrend, category: BloodPressureCategory) -> &'static str {
    match (trend, category) {
        (BloodPressureTrend::Improving, _) => {
            "Great job! Your BP is improving, which helps protect your kidneys."
        }
        (BloodPressureTrend::Stable, BloodPressureCategory::Normal) => {
            "Excellent, your BP is stable and in a healthy range."
        }
        (BloodPressureTrend::Worsening, _) => {
            "Your BP appears to be rising. This is an important signal to watch closely."
        }
        (BloodPressureTrend::Fluctuating, _) => {
            "Your BP is fluctuating. Aim for consistency in diet, exercise, and medication."
        }
        _ => "Continue monitoring your readings to establish a clear trend.",
    }
}

/// Short-term trend, kidney risk and advice for a reading list
pub fn analyze_bp_trend(readings: &[BloodPressureReading]) -> TrendResult {
    let (latest, previous) = match readings {
        [latest, previous, ..] => (latest, previous),
        _ => {
            return TrendResult {
                trend: BloodPressureTrend::InsufficientData,
                kidney_risk: None,
                risk_message: "—".to_string(),
                narrative: format!(
                    "Add at least {} readings to see your short-term trend.",
                    MIN_TREND_READINGS
                ),
            };
        }
    };

    let trend = determine_trend(latest, previous);
    let kidney_risk = assess_kidney_risk(readings);

    TrendResult {
        trend,
        kidney_risk: Some(kidney_risk),
        risk_message: kidney_risk.message(),
        narrative: trend_message(trend, classify_reading(latest)).to_string(),
    }
}

/// Compare the earlier and recent halves of the six most recent readings
pub fn analyze_long_term_progress(readings: &[BloodPressureReading]) -> LongTermProgress {
    if readings.len() < LONG_TERM_WINDOW {
        return LongTermProgress::InsufficientData;
    }

    let chronological: Vec<BloodPressureReading> =
        readings[..LONG_TERM_WINDOW].iter().rev().copied().collect();
    let (earlier_window, recent_window) = chronological.split_at(LONG_TERM_WINDOW / 2);

    let earlier = average_bp(earlier_window);
    let recent = average_bp(recent_window);

    let sys_change = i32::from(recent.systolic) - i32::from(earlier.systolic);
    let dia_change = i32::from(recent.diastolic) - i32::from(earlier.diastolic);

    if sys_change < -PROGRESS_TOLERANCE && dia_change < -PROGRESS_TOLERANCE {
        return LongTermProgress::Improving { earlier, recent };
    }
    if sys_change > PROGRESS_TOLERANCE || dia_change > PROGRESS_TOLERANCE {
        return LongTermProgress::Worsening { earlier, recent };
    }
    if sys_change.abs() <= PROGRESS_TOLERANCE && dia_change.abs() <= PROGRESS_TOLERANCE {
        let overall = average_bp(&chronological);
        if overall.systolic < HEALTHY_AVERAGE_SYSTOLIC && overall.diastolic < HEALTHY_AVERAGE_DIASTOLIC {
            return LongTermProgress::StableHealthy { overall };
        }
        return LongTermProgress::StableElevated { overall };
    }

    LongTermProgress::Fluctuating { earlier, recent }
}
