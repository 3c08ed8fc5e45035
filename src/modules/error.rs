use std::io;

use thiserror::Error;

/// Every failure a store or session operation can report back to the menu
#[derive(Debug, Error)]
pub enum TourError {
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Username must be non-empty and contain no spaces")]
    InvalidUsername,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("User '{0}' not found. Please register first")]
    UserNotFound(String),

    #[error("Wrong password")]
    WrongPassword,

    #[error("You already have an active booking. Cancel it before booking a new one")]
    AlreadyBooked,

    #[error("Invalid tour code number: {0}")]
    InvalidTourIndex(i64),

    #[error("Number of tickets must be at least 1")]
    ZeroTickets,

    #[error("Cannot book {0} tickets at once")]
    TooManyTickets(i64),

    #[error("No tour has been booked")]
    NoActiveBooking,

    #[error("Corrupt record on line {line}: {reason}")]
    CorruptRecord { line: usize, reason: String },

    #[error("Storage error: {0}")]
    StorageIo(#[from] io::Error),
}

impl TourError {
    /// Whether the failure came from the data file rather than from user input
    pub fn is_storage(&self) -> bool {
        matches!(self, TourError::StorageIo(_) | TourError::CorruptRecord { .. })
    }
}

pub type TourResult<T> = Result<T, TourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_classification() {
        assert!(TourError::StorageIo(io::Error::new(io::ErrorKind::Other, "disk")).is_storage());
        assert!(TourError::CorruptRecord {
            line: 3,
            reason: "bad".to_string()
        }
        .is_storage());
        assert!(!TourError::WrongPassword.is_storage());
        assert!(!TourError::NoActiveBooking.is_storage());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TourError::DuplicateUsername("bob".to_string()).to_string(),
            "Username 'bob' already exists"
        );
        assert_eq!(
            TourError::InvalidTourIndex(11).to_string(),
            "Invalid tour code number: 11"
        );
        assert_eq!(
            TourError::CorruptRecord {
                line: 2,
                reason: "missing field".to_string()
            }
            .to_string(),
            "Corrupt record on line 2: missing field"
        );
    }
}
