pub mod commands;
pub mod controller;
pub mod state;

pub use commands::{GuestCommand, MemberCommand};
pub use controller::{startup_notice, Flow, SessionController};
pub use state::Session;
