pub mod summary_service;
pub mod transaction_service;
