pub mod game_service;
pub mod recommendation_service;
pub mod state;

pub use game_service::*;
pub use recommendation_service::*;
pub use state::*;
