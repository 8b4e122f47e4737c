// HealthFlow Domain
// Blood pressure rules, dashboard assembly, profiles and local accounts

// Services that implement business logic
pub mod services;

// Local accounts and sessions
pub mod auth;

// Domain entities
pub mod entities;

// Request validation shared with the API layer
pub mod validation;

// Testing utilities - available in tests and with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
