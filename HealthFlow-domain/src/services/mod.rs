// Domain services
// Rule engine, dashboard assembly and the session-scoped services built on them.

pub mod account;
pub mod blood_pressure;
pub mod dashboard;
pub mod insights;

// Re-export service traits and factory functions
pub use account::{AccountService, AccountServiceError};
pub use blood_pressure::{
    create_default_blood_pressure_service, BloodPressureService, BloodPressureServiceError,
    BloodPressureServiceTrait,
};
pub use dashboard::build_dashboard;
