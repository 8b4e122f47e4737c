use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::auth::{Session, SessionError, SessionRegistry};
use crate::entities::blood_pressure::{
    BloodPressureCategory, BloodPressureReading, CreateBloodPressureRequest,
};
use crate::entities::conversions;
use crate::entities::dashboard::DashboardSummary;
use crate::services::dashboard::build_dashboard;
use crate::services::insights::classify_reading;
use crate::validation::validate_reading_request;
use health_flow_data::repository::{RepositoryError, UserRepositoryTrait};

/// Blood pressure service errors
#[derive(Debug, Error)]
pub enum BloodPressureServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The session's account no longer exists
    #[error("User not found: {0}")]
    NotFound(String),

    /// Unknown or logged-out session
    #[error(transparent)]
    SessionError(#[from] SessionError),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for blood pressure service operations
#[async_trait]
pub trait BloodPressureServiceTrait {
    /// Validate a create blood pressure request
    fn validate_create_request(
        &self,
        request: &CreateBloodPressureRequest,
    ) -> Result<(), BloodPressureServiceError>;

    /// Get severity category for a blood pressure reading
    fn get_severity(&self, reading: &BloodPressureReading) -> BloodPressureCategory;

    /// Record a reading at the front of the session user's history
    async fn add_reading(
        &self,
        session: &Session,
        request: CreateBloodPressureRequest,
    ) -> Result<BloodPressureReading, BloodPressureServiceError>;

    /// The session user's readings, most-recent-first
    async fn get_history(&self, session: &Session) -> Result<Vec<BloodPressureReading>, BloodPressureServiceError>;

    /// Dashboard for the session user
    async fn get_dashboard(&self, session: &Session) -> Result<DashboardSummary, BloodPressureServiceError>;
}

/// Blood pressure service for domain logic
pub struct BloodPressureService<R: UserRepositoryTrait> {
    repository: R,
    sessions: SessionRegistry,
}

impl<R: UserRepositoryTrait> BloodPressureService<R> {
    /// Create a new blood pressure service checking sessions against `sessions`
    pub fn new(repository: R, sessions: SessionRegistry) -> Self {
        Self { repository, sessions }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> BloodPressureServiceError {
        match err {
            RepositoryError::NotFound(msg) => BloodPressureServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => BloodPressureServiceError::ValidationError(msg),
            _ => BloodPressureServiceError::RepositoryError(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: UserRepositoryTrait + Send + Sync> BloodPressureServiceTrait for BloodPressureService<R> {
    fn validate_create_request(
        &self,
        request: &CreateBloodPressureRequest,
    ) -> Result<(), BloodPressureServiceError> {
        validate_reading_request(request).map_err(BloodPressureServiceError::ValidationError)
    }

    fn get_severity(&self, reading: &BloodPressureReading) -> BloodPressureCategory {
        classify_reading(reading)
    }

    #[instrument(skip(self, session), fields(email = %session.email))]
    async fn add_reading(
        &self,
        session: &Session,
        request: CreateBloodPressureRequest,
    ) -> Result<BloodPressureReading, BloodPressureServiceError> {
        self.sessions.verify(session)?;
        self.validate_create_request(&request)?;

        let reading = request.into_reading();
        let count = self
            .repository
            .prepend_reading(&session.email, conversions::convert_to_data_reading(&reading))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        debug!("Stored reading {}/{}, {} on record", reading.systolic, reading.diastolic, count);
        Ok(reading)
    }

    #[instrument(skip(self, session), fields(email = %session.email))]
    async fn get_history(&self, session: &Session) -> Result<Vec<BloodPressureReading>, BloodPressureServiceError> {
        self.sessions.verify(session)?;
        let data_readings = self
            .repository
            .get_readings(&session.email)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect())
    }

    async fn get_dashboard(&self, session: &Session) -> Result<DashboardSummary, BloodPressureServiceError> {
        let readings = self.get_history(session).await?;
        Ok(build_dashboard(&readings))
    }
}

/// Create a blood pressure service over the given repository and session registry
pub fn create_default_blood_pressure_service<R>(
    repository: R,
    sessions: SessionRegistry,
) -> impl BloodPressureServiceTrait + Send + Sync
where
    R: UserRepositoryTrait + Send + Sync,
{
    BloodPressureService::new(repository, sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::analysis::BloodPressureTrend;
    use chrono::{Duration, Local, NaiveDate, NaiveTime};
    use health_flow_data::models::StoredUser;
    use health_flow_data::repository::tests::MockUserRepository;

    const EMAIL: &str = "sam@example.com";

    fn service_with_user() -> (BloodPressureService<MockUserRepository>, Session) {
        let repository = MockUserRepository::new().with_user(StoredUser::new(EMAIL, "hash"));
        let sessions = SessionRegistry::new();
        let session = sessions.open(EMAIL).unwrap();
        (BloodPressureService::new(repository, sessions), session)
    }

    fn request(systolic: u16, diastolic: u16, day: u32) -> CreateBloodPressureRequest {
        CreateBloodPressureRequest {
            systolic,
            diastolic,
            pulse: 72,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_validate_create_request() {
        let (service, _) = service_with_user();

        assert!(service.validate_create_request(&request(120, 80, 1)).is_ok());

        let err = service.validate_create_request(&request(350, 80, 1)).unwrap_err();
        assert!(err.to_string().contains("Systolic"));

        let err = service.validate_create_request(&request(80, 80, 1)).unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn test_validate_rejects_future_date() {
        let (service, _) = service_with_user();
        let mut future = request(120, 80, 1);
        future.date = Local::now().date_naive() + Duration::days(1);

        let err = service.validate_create_request(&future).unwrap_err();
        assert!(err.to_string().contains("future"));
    }

    #[test]
    fn test_get_severity() {
        let (service, _) = service_with_user();
        let reading = request(200, 60, 1).into_reading();
        assert_eq!(service.get_severity(&reading), BloodPressureCategory::Stage1Hypertension);
    }

    #[tokio::test]
    async fn test_add_reading_prepends() {
        let (service, session) = service_with_user();

        service.add_reading(&session, request(130, 85, 1)).await.unwrap();
        let latest = service.add_reading(&session, request(118, 76, 2)).await.unwrap();

        let history = service.get_history(&session).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], latest);
        assert_eq!(history[1].systolic, 130);
    }

    #[tokio::test]
    async fn test_invalid_reading_is_not_stored() {
        let (service, session) = service_with_user();

        let result = service.add_reading(&session, request(60, 90, 1)).await;
        assert!(matches!(result, Err(BloodPressureServiceError::ValidationError(_))));
        assert!(service.get_history(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_reflects_history() {
        let (service, session) = service_with_user();
        service.add_reading(&session, request(132, 88, 1)).await.unwrap();
        service.add_reading(&session, request(120, 78, 2)).await.unwrap();

        let dashboard = service.get_dashboard(&session).await.unwrap();
        assert_eq!(dashboard.trend.trend, BloodPressureTrend::Improving);
        assert_eq!(dashboard.chart.systolic, vec![132, 120]);
        assert_eq!(dashboard.history.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let sessions = SessionRegistry::new();
        let session = sessions.open("ghost@example.com").unwrap();
        let service = BloodPressureService::new(MockUserRepository::new(), sessions);

        let result = service.get_history(&session).await;
        assert!(matches!(result, Err(BloodPressureServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_session_not_opened_here_is_rejected() {
        let (service, _) = service_with_user();
        let stranger = SessionRegistry::new().open(EMAIL).unwrap();

        let result = service.get_history(&stranger).await;
        assert!(matches!(result, Err(BloodPressureServiceError::SessionError(SessionError::Inactive))));
        let result = service.add_reading(&stranger, request(120, 80, 1)).await;
        assert!(matches!(result, Err(BloodPressureServiceError::SessionError(_))));
    }

    #[tokio::test]
    async fn test_closed_session_is_rejected() {
        let repository = MockUserRepository::new().with_user(StoredUser::new(EMAIL, "hash"));
        let sessions = SessionRegistry::new();
        let session = sessions.open(EMAIL).unwrap();
        let service = BloodPressureService::new(repository, sessions.clone());
        service.add_reading(&session, request(124, 80, 1)).await.unwrap();

        sessions.close(&session).unwrap();

        let result = service.get_dashboard(&session).await;
        assert!(matches!(result, Err(BloodPressureServiceError::SessionError(SessionError::Inactive))));
    }

    #[tokio::test]
    async fn test_storage_failure_is_repository_error() {
        let repository = MockUserRepository::new()
            .with_user(StoredUser::new(EMAIL, "hash"))
            .failing();
        let sessions = SessionRegistry::new();
        let session = sessions.open(EMAIL).unwrap();
        let service = BloodPressureService::new(repository, sessions);

        let result = service.get_dashboard(&session).await;
        assert!(matches!(result, Err(BloodPressureServiceError::RepositoryError(_))));
    }
}
