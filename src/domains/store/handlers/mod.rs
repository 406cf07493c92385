pub mod deposit_handler;
pub mod purchase_handler;
pub mod transaction_handler;
