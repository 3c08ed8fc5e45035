pub mod password;
pub mod store;

// Re-export the main types and functions
pub use password::{validate_password, validate_username};
pub use store::{UserRecord, UserStore};
