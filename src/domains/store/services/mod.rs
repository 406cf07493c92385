// Store domain services
pub mod deposit_service;
pub mod ledger_service;
pub mod purchase_service;
pub mod state;

pub use deposit_service::*;
pub use ledger_service::*;
pub use purchase_service::*;
pub use state::*;
