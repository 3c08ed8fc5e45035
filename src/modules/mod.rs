// Declare all modules
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod utils;

// No re-exports here as they're handled in lib.rs
