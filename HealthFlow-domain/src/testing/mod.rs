// Testing utilities for the domain layer and its dependents
// Available in unit tests and with the "mock" feature

use chrono::{Duration, NaiveDate, NaiveTime};

pub use health_flow_data::repository::tests::MockUserRepository;

use crate::auth::{CredentialError, CredentialHasher};
use crate::entities::blood_pressure::BloodPressureReading;

const PLAIN_PREFIX: &str = "plain$";

/// Reversible stand-in for Argon2 so tests stay fast
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCredentialHasher;

impl CredentialHasher for MockCredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        Ok(format!("{}{}", PLAIN_PREFIX, password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        hash.strip_prefix(PLAIN_PREFIX)
            .map(|stored| stored == password)
            .ok_or_else(|| CredentialError::MalformedHash(hash.to_string()))
    }
}

/// A reading with a fixed pulse, date and time
pub fn reading(systolic: u16, diastolic: u16) -> BloodPressureReading {
    BloodPressureReading::new(
        systolic,
        diastolic,
        70,
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
    )
}

/// Readings from (systolic, diastolic) pairs, most-recent-first.
///
/// The first pair is dated 2024-06-30 and each later pair one day earlier.
pub fn readings_from_pairs(pairs: &[(u16, u16)]) -> Vec<BloodPressureReading> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, &(systolic, diastolic))| {
            let mut reading = reading(systolic, diastolic);
            reading.date = reading.date - Duration::days(index as i64);
            reading
        })
        .collect()
}
