pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod locale;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;
