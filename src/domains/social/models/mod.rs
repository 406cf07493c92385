pub mod review;
pub mod wishlist;
