// Shared clients
pub mod recommender;

pub use recommender::*;
