// Domain entities and value objects
pub mod account;
pub mod analysis;
pub mod blood_pressure;
pub mod conversions;
pub mod dashboard;
pub mod profile;

// Re-export common types for easier imports
pub use account::Credentials;
pub use analysis::{BloodPressureTrend, KidneyRisk, LongTermProgress, TrendResult};
pub use blood_pressure::{
    BloodPressureAverage, BloodPressureCategory, BloodPressureReading, CreateBloodPressureRequest,
};
pub use dashboard::{ChartSeries, DashboardSummary, HistoryEntry, LatestReadingCard};
pub use profile::{calculate_bmi, BmiStatus, Profile, UpdateProfileRequest};
