pub mod purchase;
pub mod transaction;
