use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::blood_pressure::BloodPressureReading;

/// Storage model for a user profile.
///
/// BMI is not stored; the domain layer derives it from height and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Storage model for a registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    /// Email address, also the storage key
    pub email: String,

    /// PHC-formatted credential hash, never the plain password
    pub password_hash: String,

    /// Profile, absent until the user saves one
    #[serde(default)]
    pub profile: Option<StoredProfile>,

    /// Readings ordered most-recent-first
    #[serde(default)]
    pub bp_records: Vec<BloodPressureReading>,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Create a freshly registered user with no profile and no readings
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            profile: None,
            bp_records: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
