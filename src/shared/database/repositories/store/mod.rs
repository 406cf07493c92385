// Store repositories
pub mod purchase_repository;
pub mod transaction_repository;

pub use purchase_repository::*;
pub use transaction_repository::*;
