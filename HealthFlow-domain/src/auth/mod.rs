//! Local accounts: credential hashing, sessions and account event logging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod credentials;
pub mod logging;
pub mod sessions;

pub use credentials::{Argon2Credentials, CredentialError, CredentialHasher};
pub use sessions::{SessionError, SessionRegistry};

/// An authenticated session for one account.
///
/// Sessions are opened through a [`SessionRegistry`]. Services check each one
/// against the registry, so a copy kept after logout is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn start(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_get_unique_ids() {
        let first = Session::start("ana@example.com");
        let second = Session::start("ana@example.com");
        assert_ne!(first.id, second.id);
        assert_eq!(first.email, "ana@example.com");
    }
}
