// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{auth, booking, catalog, config, error, session, storage, utils};

// Re-export commonly used types
pub use modules::auth::store::{UserRecord, UserStore};
pub use modules::booking::Booking;
pub use modules::catalog::{Tour, TOUR_CATALOG};
pub use modules::config::AppConfig;
pub use modules::error::TourError;
pub use modules::session::{Session, SessionController};
pub use modules::storage::PersistentStore;

// Constants
pub const USERS_FILE: &str = "users.jsonl";
pub const LEGACY_USERS_FILE: &str = "users.txt";
pub const LOG_FILE: &str = "application.log";
pub const NO_BOOKING: &str = "N/A";
pub const CURRENCY: &str = "Rs";
