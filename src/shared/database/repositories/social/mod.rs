// Social repositories
pub mod review_repository;
pub mod wishlist_repository;

pub use review_repository::*;
pub use wishlist_repository::*;
