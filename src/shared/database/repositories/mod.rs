// All repositories module
pub mod auth;
pub mod catalog;
pub mod social;
pub mod store;

// Re-export all repositories for convenience
pub use auth::*;
pub use catalog::*;
pub use social::*;
pub use store::*;
