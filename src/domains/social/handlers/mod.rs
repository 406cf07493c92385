pub mod review_handler;
pub mod wishlist_handler;
