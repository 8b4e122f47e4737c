// Repository module structure
pub mod errors;
mod in_memory;
mod user;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use user::{UserRepository, UserRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use user::tests;
