use crate::entities::blood_pressure::BloodPressureReading;
use crate::entities::dashboard::{ChartSeries, DashboardSummary, HistoryEntry, LatestReadingCard};
use crate::services::insights::{analyze_bp_trend, analyze_long_term_progress, classify_reading};

const CHART_DATE_FORMAT: &str = "%Y-%m-%d";

/// Chart data in chronological order, oldest reading first
pub fn chart_series(readings: &[BloodPressureReading]) -> ChartSeries {
    let mut chart = ChartSeries::default();
    for reading in readings.iter().rev() {
        chart.labels.push(reading.date.format(CHART_DATE_FORMAT).to_string());
        chart.systolic.push(reading.systolic);
        chart.diastolic.push(reading.diastolic);
    }
    chart
}

/// Categorized history rows, most-recent-first
pub fn history(readings: &[BloodPressureReading]) -> Vec<HistoryEntry> {
    readings
        .iter()
        .map(|reading| HistoryEntry {
            reading: *reading,
            category: classify_reading(reading),
        })
        .collect()
}

/// Derive the whole dashboard from a most-recent-first reading list
pub fn build_dashboard(readings: &[BloodPressureReading]) -> DashboardSummary {
    let latest = readings.first().map(|reading| {
        let category = classify_reading(reading);
        LatestReadingCard {
            reading: *reading,
            category,
            tip: category.tip().to_string(),
        }
    });
    let progress = analyze_long_term_progress(readings);

    DashboardSummary {
        latest,
        trend: analyze_bp_trend(readings),
        progress,
        progress_narrative: progress.narrative(),
        chart: chart_series(readings),
        history: history(readings),
    }
}
