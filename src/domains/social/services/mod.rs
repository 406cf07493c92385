pub mod review_service;
pub mod wishlist_service;
pub mod state;

pub use review_service::*;
pub use wishlist_service::*;
pub use state::*;
