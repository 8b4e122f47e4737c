// Data storage models
pub mod blood_pressure;
pub mod user;

pub use blood_pressure::BloodPressureReading;
pub use user::{StoredProfile, StoredUser};
