pub mod auth;
pub mod health;
pub mod investments;
pub mod summary;
pub mod transactions;
