use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::Session;

/// Session registry errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Never opened here, or already closed by logout
    #[error("Session is not active, please log in again")]
    Inactive,

    #[error("Session registry lock error: {0}")]
    Lock(String),
}

impl<T> From<std::sync::PoisonError<T>> for SessionError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        SessionError::Lock(err.to_string())
    }
}

/// Active sessions keyed by id, shared between the services of one host
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    active: Arc<Mutex<HashMap<Uuid, String>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `email` and mark it active
    pub fn open(&self, email: impl Into<String>) -> Result<Session, SessionError> {
        let session = Session::start(email);
        let mut active = self.active.lock()?;
        active.insert(session.id, session.email.clone());
        debug!("Opened session {} ({} active)", session.id, active.len());
        Ok(session)
    }

    /// Ok when `session` was opened here, is not closed and still names the same account
    pub fn verify(&self, session: &Session) -> Result<(), SessionError> {
        let active = self.active.lock()?;
        match active.get(&session.id) {
            Some(email) if *email == session.email => Ok(()),
            _ => {
                warn!("Rejected inactive session {}", session.id);
                Err(SessionError::Inactive)
            }
        }
    }

    /// Close an active session; every copy of it is rejected afterwards
    pub fn close(&self, session: &Session) -> Result<(), SessionError> {
        self.verify(session)?;
        self.active.lock()?.remove(&session.id);
        Ok(())
    }

    /// Number of open sessions
    pub fn active_count(&self) -> Result<usize, SessionError> {
        Ok(self.active.lock()?.len())
    }
}
