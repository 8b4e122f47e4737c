// Public entities for the HealthFlow API
// Wire types are kept apart from the domain so the domain carries no schema derives

// Blood pressure requests and the analysis response
pub mod blood_pressure;

// Common entities for error handling
pub mod common;

// BMI request and response
pub mod profile;
