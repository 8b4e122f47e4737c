use axum::extract::{rejection::JsonRejection, Json};
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use health_flow_domain::entities::analysis::{KidneyRisk, LongTermProgress, TrendResult};
use health_flow_domain::entities::blood_pressure::{
    BloodPressureAverage, BloodPressureCategory, BloodPressureReading, CreateBloodPressureRequest,
};
use health_flow_domain::entities::dashboard::DashboardSummary;
use health_flow_domain::services::build_dashboard;
use health_flow_domain::services::insights::classify;
use health_flow_domain::validation::{describe_validation_errors, validate_reading_request};

use crate::entities::blood_pressure::{
    AnalysisRequest, AnalysisResponse, ChartResponse, ClassifyRequest, ClassifyResponse,
    HistoryEntryResponse, KidneyRiskResponse, LatestReadingResponse, ProgressResponse,
    PublicAverage, PublicBloodPressureCategory, PublicBloodPressureReading, TrendResponse,
};
use crate::entities::common::ErrorResponse;

/// Classify a single blood pressure measurement
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Category of the measurement", body = ClassifyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(payload))]
pub async fn classify_reading(
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(|rejection| ErrorResponse::bad_request(rejection.body_text()))?;

    request.validate().map_err(|errors| {
        ErrorResponse::validation_error(describe_validation_errors(&errors), None)
    })?;

    let category = classify(request.systolic, request.diastolic);
    info!("Classified {}/{} as {}", request.systolic, request.diastolic, category);

    Ok(Json(convert_to_public_classification(category)))
}

/// Analyze a reading history and return the dashboard
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Dashboard for the readings", body = AnalysisResponse),
        (status = 400, description = "A reading is invalid", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(payload))]
pub async fn analyze_readings(
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(|rejection| ErrorResponse::bad_request(rejection.body_text()))?;

    let mut readings = Vec::with_capacity(request.readings.len());
    for (index, public_reading) in request.readings.into_iter().enumerate() {
        let create_request = convert_to_domain_create_request(public_reading);
        if let Err(message) = validate_reading_request(&create_request) {
            warn!("Rejected reading {} in analysis request: {}", index, message);
            return Err(ErrorResponse::validation_error(
                format!("Reading {} is invalid", index),
                Some(json!({ "index": index, "error": message })),
            ));
        }
        readings.push(create_request.into_reading());
    }

    info!("Analyzing {} readings", readings.len());
    Ok(Json(convert_to_public_analysis(build_dashboard(&readings))))
}

// Conversion functions from domain to public entities

fn convert_to_domain_create_request(reading: PublicBloodPressureReading) -> CreateBloodPressureRequest {
    CreateBloodPressureRequest {
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        pulse: reading.pulse,
        date: reading.date,
        time: reading.time,
    }
}

fn convert_to_public_reading(reading: BloodPressureReading) -> PublicBloodPressureReading {
    PublicBloodPressureReading {
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        pulse: reading.pulse,
        date: reading.date,
        time: reading.time,
    }
}

fn convert_to_public_category(category: BloodPressureCategory) -> PublicBloodPressureCategory {
    match category {
        BloodPressureCategory::Normal => PublicBloodPressureCategory::Normal,
        BloodPressureCategory::Elevated => PublicBloodPressureCategory::Elevated,
        BloodPressureCategory::Stage1Hypertension => PublicBloodPressureCategory::Stage1Hypertension,
        BloodPressureCategory::Stage2Hypertension => PublicBloodPressureCategory::Stage2Hypertension,
    }
}

fn convert_to_public_classification(category: BloodPressureCategory) -> ClassifyResponse {
    ClassifyResponse {
        category: convert_to_public_category(category),
        label: category.label().to_string(),
        tip: category.tip().to_string(),
    }
}

fn convert_to_public_average(average: BloodPressureAverage) -> PublicAverage {
    PublicAverage {
        systolic: average.systolic,
        diastolic: average.diastolic,
    }
}

fn convert_to_public_kidney_risk(risk: KidneyRisk) -> KidneyRiskResponse {
    KidneyRiskResponse {
        elevated: risk.is_elevated(),
        average: convert_to_public_average(risk.average()),
    }
}

fn convert_to_public_trend(result: TrendResult) -> TrendResponse {
    TrendResponse {
        trend: result.trend.label().to_string(),
        kidney_risk: result.kidney_risk.map(convert_to_public_kidney_risk),
        risk_message: result.risk_message,
        narrative: result.narrative,
    }
}

fn convert_to_public_progress(progress: LongTermProgress, narrative: String) -> ProgressResponse {
    let (status, earlier, recent, overall) = match progress {
        LongTermProgress::InsufficientData => ("insufficient_data", None, None, None),
        LongTermProgress::Improving { earlier, recent } => ("improving", Some(earlier), Some(recent), None),
        LongTermProgress::Worsening { earlier, recent } => ("worsening", Some(earlier), Some(recent), None),
        LongTermProgress::StableHealthy { overall } => ("stable_healthy", None, None, Some(overall)),
        LongTermProgress::StableElevated { overall } => ("stable_elevated", None, None, Some(overall)),
        LongTermProgress::Fluctuating { earlier, recent } => ("fluctuating", Some(earlier), Some(recent), None),
    };

    ProgressResponse {
        status: status.to_string(),
        narrative,
        earlier: earlier.map(convert_to_public_average),
        recent: recent.map(convert_to_public_average),
        overall: overall.map(convert_to_public_average),
    }
}

fn convert_to_public_analysis(summary: DashboardSummary) -> AnalysisResponse {
    AnalysisResponse {
        latest: summary.latest.map(|card| LatestReadingResponse {
            reading: convert_to_public_reading(card.reading),
            category: convert_to_public_category(card.category),
            label: card.category.label().to_string(),
            tip: card.tip,
        }),
        trend: convert_to_public_trend(summary.trend),
        progress: convert_to_public_progress(summary.progress, summary.progress_narrative),
        chart: ChartResponse {
            labels: summary.chart.labels,
            systolic: summary.chart.systolic,
            diastolic: summary.chart.diastolic,
        },
        history: summary
            .history
            .into_iter()
            .map(|entry| HistoryEntryResponse {
                reading: convert_to_public_reading(entry.reading),
                category: convert_to_public_category(entry.category),
                label: entry.category.label().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn public_reading(systolic: u16, diastolic: u16, day: u32) -> PublicBloodPressureReading {
        PublicBloodPressureReading {
            systolic,
            diastolic,
            pulse: 68,
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_classify_reading() {
        let Json(response) = classify_reading(Ok(Json(ClassifyRequest { systolic: 135, diastolic: 85 })))
            .await
            .unwrap();

        assert_eq!(response.category, PublicBloodPressureCategory::Stage1Hypertension);
        assert_eq!(response.label, "Stage 1 Hypertension");
    }

    #[tokio::test]
    async fn test_classify_out_of_range() {
        let err = classify_reading(Ok(Json(ClassifyRequest { systolic: 20, diastolic: 85 })))
            .await
            .unwrap_err();
        assert_eq!(err.error, "validation_error");
        assert!(err.message.contains("Systolic"));
    }

    #[tokio::test]
    async fn test_analysis_reports_first_invalid_reading() {
        let request = AnalysisRequest {
            readings: vec![
                public_reading(120, 80, 3),
                public_reading(80, 90, 2),
                public_reading(500, 90, 1),
            ],
        };

        let err = analyze_readings(Ok(Json(request))).await.unwrap_err();
        assert_eq!(err.message, "Reading 1 is invalid");
        assert_eq!(err.details.unwrap()["index"], 1);
    }

    #[tokio::test]
    async fn test_analysis_of_two_readings() {
        let request = AnalysisRequest {
            readings: vec![public_reading(118, 76, 2), public_reading(130, 86, 1)],
        };

        let Json(response) = analyze_readings(Ok(Json(request))).await.unwrap();
        assert_eq!(response.trend.trend, "Improving");
        assert_eq!(response.progress.status, "insufficient_data");
        assert_eq!(response.chart.labels, vec!["2024-04-01", "2024-04-02"]);
        assert_eq!(response.latest.unwrap().category, PublicBloodPressureCategory::Normal);
    }

    #[test]
    fn test_progress_conversion_keeps_averages() {
        let progress = LongTermProgress::StableElevated { overall: BloodPressureAverage::new(134, 86) };
        let response = convert_to_public_progress(progress, progress.narrative());

        assert_eq!(response.status, "stable_elevated");
        assert_eq!(response.overall, Some(PublicAverage { systolic: 134, diastolic: 86 }));
        assert!(response.earlier.is_none());
    }
}
