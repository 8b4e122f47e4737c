use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Types of account events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEventType {
    /// New account registered
    Registration,
    /// Successful login
    Login,
    /// Failed login attempt
    FailedLogin,
    /// Session ended
    Logout,
    /// Profile saved
    ProfileUpdate,
}

impl fmt::Display for AuthEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthEventType::Registration => write!(f, "REGISTRATION"),
            AuthEventType::Login => write!(f, "LOGIN"),
            AuthEventType::FailedLogin => write!(f, "FAILED_LOGIN"),
            AuthEventType::Logout => write!(f, "LOGOUT"),
            AuthEventType::ProfileUpdate => write!(f, "PROFILE_UPDATE"),
        }
    }
}

/// Account event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    pub event_type: AuthEventType,
    /// Account email, when known
    pub email: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub details: Option<String>,
    /// Session the event belongs to
    pub session_id: Option<String>,
}

impl AuthEvent {
    pub fn new(event_type: AuthEventType, email: Option<&str>, success: bool) -> Self {
        Self {
            event_type,
            email: email.map(String::from),
            timestamp: Utc::now(),
            success,
            details: None,
            session_id: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Log an account event
pub fn log_auth_event(event: AuthEvent) {
    let email = event.email.as_deref().unwrap_or("anonymous");
    let status = if event.success { "SUCCESS" } else { "FAILURE" };
    let session = event.session_id.as_deref().unwrap_or("-");
    let details = event.details.as_deref().unwrap_or("");

    info!(
        "AUTH-LOG [{}] [{}] [{}] [{}] [{}] {}",
        event.event_type,
        email,
        status,
        session,
        event.timestamp.to_rfc3339(),
        details
    );
}

pub fn log_registration(email: &str, success: bool, details: Option<&str>) {
    let mut event = AuthEvent::new(AuthEventType::Registration, Some(email), success);
    if let Some(d) = details {
        event = event.with_details(d);
    }
    log_auth_event(event);
}

pub fn log_successful_login(email: &str, session_id: &str) {
    log_auth_event(AuthEvent::new(AuthEventType::Login, Some(email), true).with_session(session_id));
}

/// The reason is logged, never returned to the caller
pub fn log_failed_login(email: &str, reason: &str) {
    log_auth_event(AuthEvent::new(AuthEventType::FailedLogin, Some(email), false).with_details(reason));
}

pub fn log_logout(email: &str, session_id: &str) {
    log_auth_event(AuthEvent::new(AuthEventType::Logout, Some(email), true).with_session(session_id));
}

pub fn log_profile_update(email: &str, session_id: &str) {
    log_auth_event(AuthEvent::new(AuthEventType::ProfileUpdate, Some(email), true).with_session(session_id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_auth_event() {
        let event = AuthEvent::new(AuthEventType::Login, Some("ana@example.com"), true)
            .with_details("password")
            .with_session("4c1f");

        assert_eq!(event.event_type, AuthEventType::Login);
        assert_eq!(event.email.as_deref(), Some("ana@example.com"));
        assert!(event.success);
        assert_eq!(event.details.as_deref(), Some("password"));
        assert_eq!(event.session_id.as_deref(), Some("4c1f"));
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(AuthEventType::Registration.to_string(), "REGISTRATION");
        assert_eq!(AuthEventType::FailedLogin.to_string(), "FAILED_LOGIN");
        assert_eq!(AuthEventType::ProfileUpdate.to_string(), "PROFILE_UPDATE");
    }
}
