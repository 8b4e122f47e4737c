// HealthFlow Data
// This crate handles storage of user accounts, profiles and blood pressure readings

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
