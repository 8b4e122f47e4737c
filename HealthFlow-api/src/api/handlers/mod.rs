pub mod blood_pressure;
pub mod health;
pub mod profile;

// Re-export handlers for easier imports
pub use blood_pressure::{analyze_readings, classify_reading};
pub use health::health_check;
pub use profile::calculate_bmi_handler;
