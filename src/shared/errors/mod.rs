// Shared errors
pub mod auth_error;
pub mod catalog_error;
pub mod social_error;
pub mod store_error;

pub use auth_error::*;
pub use catalog_error::*;
pub use social_error::*;
pub use store_error::*;
