//! Registration, login and profile management for local accounts

use thiserror::Error;
use tracing::instrument;
use validator::Validate;

use crate::auth::logging::{
    log_failed_login, log_logout, log_profile_update, log_registration, log_successful_login,
};
use crate::auth::{CredentialError, CredentialHasher, Session, SessionError, SessionRegistry};
use crate::entities::account::Credentials;
use crate::entities::conversions;
use crate::entities::profile::{Profile, UpdateProfileRequest};
use crate::validation::describe_validation_errors;
use health_flow_data::models::StoredUser;
use health_flow_data::repository::{RepositoryError, UserRepositoryTrait};

/// Account service errors
#[derive(Debug, Error)]
pub enum AccountServiceError {
    #[error("Please fill in email and password")]
    MissingCredentials,

    /// Returned for both an unknown email and a wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    CredentialError(#[from] CredentialError),

    /// Unknown or logged-out session
    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Account service over a user repository, a credential hasher and the
/// session registry shared with the other session-scoped services
pub struct AccountService<R: UserRepositoryTrait, H: CredentialHasher> {
    repository: R,
    hasher: H,
    sessions: SessionRegistry,
}

impl<R, H> AccountService<R, H>
where
    R: UserRepositoryTrait + Send + Sync,
    H: CredentialHasher + Send + Sync,
{
    pub fn new(repository: R, hasher: H, sessions: SessionRegistry) -> Self {
        Self {
            repository,
            hasher,
            sessions,
        }
    }

    fn map_repo_error(&self, err: RepositoryError) -> AccountServiceError {
        match err {
            RepositoryError::AlreadyExists(_) => AccountServiceError::AlreadyExists,
            RepositoryError::NotFound(msg) => AccountServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => AccountServiceError::ValidationError(msg),
            _ => AccountServiceError::RepositoryError(err.to_string()),
        }
    }

    /// Trim and check presence, then email format
    fn prepare(credentials: &Credentials) -> Result<Credentials, AccountServiceError> {
        let trimmed = credentials.trimmed();
        if trimmed.is_incomplete() {
            return Err(AccountServiceError::MissingCredentials);
        }
        trimmed
            .validate()
            .map_err(|errors| AccountServiceError::ValidationError(describe_validation_errors(&errors)))?;
        Ok(trimmed)
    }

    /// Register a new account and start a session for it
    #[instrument(skip(self, credentials), fields(email = %credentials.email.trim()))]
    pub async fn register(&self, credentials: &Credentials) -> Result<Session, AccountServiceError> {
        let credentials = Self::prepare(credentials)?;

        if self
            .repository
            .get_user(&credentials.email)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .is_some()
        {
            log_registration(&credentials.email, false, Some("email already registered"));
            return Err(AccountServiceError::AlreadyExists);
        }

        let password_hash = self.hasher.hash(&credentials.password)?;
        self.repository
            .create_user(StoredUser::new(credentials.email.clone(), password_hash))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        log_registration(&credentials.email, true, None);
        Ok(self.sessions.open(credentials.email)?)
    }

    /// Check credentials and start a session
    #[instrument(skip(self, credentials), fields(email = %credentials.email.trim()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AccountServiceError> {
        let credentials = credentials.trimmed();
        if credentials.is_incomplete() {
            return Err(AccountServiceError::MissingCredentials);
        }

        let user = match self
            .repository
            .get_user(&credentials.email)
            .await
            .map_err(|e| self.map_repo_error(e))?
        {
            Some(user) => user,
            None => {
                log_failed_login(&credentials.email, "unknown email");
                return Err(AccountServiceError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(&credentials.password, &user.password_hash)? {
            log_failed_login(&credentials.email, "wrong password");
            return Err(AccountServiceError::InvalidCredentials);
        }

        let session = self.sessions.open(user.email)?;
        log_successful_login(&session.email, &session.id.to_string());
        Ok(session)
    }

    /// End a session; it and any copy of it are rejected from then on
    pub fn logout(&self, session: Session) -> Result<(), AccountServiceError> {
        self.sessions.close(&session)?;
        log_logout(&session.email, &session.id.to_string());
        Ok(())
    }

    /// Validate and store the session user's profile, BMI included
    #[instrument(skip(self, session, request), fields(email = %session.email))]
    pub async fn save_profile(
        &self,
        session: &Session,
        request: UpdateProfileRequest,
    ) -> Result<Profile, AccountServiceError> {
        self.sessions.verify(session)?;
        let request = request.normalized();
        request
            .validate()
            .map_err(|errors| AccountServiceError::ValidationError(describe_validation_errors(&errors)))?;

        let profile = request.into_profile();
        self.repository
            .update_profile(&session.email, conversions::convert_to_data_profile(&profile))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        log_profile_update(&session.email, &session.id.to_string());
        Ok(profile)
    }

    /// The session user's profile, if one was saved
    pub async fn get_profile(&self, session: &Session) -> Result<Option<Profile>, AccountServiceError> {
        self.sessions.verify(session)?;
        let user = self
            .repository
            .get_user(&session.email)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| AccountServiceError::NotFound(session.email.clone()))?;

        Ok(user.profile.map(conversions::convert_to_domain_profile))
    }
}
