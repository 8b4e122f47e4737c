// HealthFlow API lib.rs
//
// Stateless HTTP surface over the HealthFlow rule engine.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
