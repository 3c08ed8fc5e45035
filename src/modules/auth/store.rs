use std::collections::HashMap;

use super::password::{validate_password, validate_username};
use crate::modules::booking::Booking;
use crate::modules::error::{TourError, TourResult};
use crate::NO_BOOKING;

/// Represents a single user with their credentials and current booking
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub username: String,
    pub password: String, // Stored as entered
    pub booking: Option<Booking>,
}

impl UserRecord {
    /// Create a record with no booking
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            booking: None,
        }
    }

    /// Booked destination, or the no-booking sentinel
    pub fn booked_place(&self) -> &str {
        self.booking
            .as_ref()
            .map_or(NO_BOOKING, |booking| booking.place.as_str())
    }

    pub fn price_per_ticket(&self) -> f64 {
        self.booking.as_ref().map_or(0.0, |booking| booking.price)
    }

    pub fn ticket_count(&self) -> u32 {
        self.booking.as_ref().map_or(0, |booking| booking.tickets)
    }
}

/// Container for all users, kept in registration order with a username index
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserStore {
    records: Vec<UserRecord>,
    index: HashMap<String, usize>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Function to add a new user to the store
    pub fn register(&mut self, username: &str, password: &str) -> TourResult<&UserRecord> {
        validate_username(username)?;
        validate_password(password)?;
        self.insert(UserRecord::new(username, password))
    }

    /// Append an existing record, rejecting a username that is already taken
    pub fn insert(&mut self, record: UserRecord) -> TourResult<&UserRecord> {
        // Exact, case-sensitive match
        if self.index.contains_key(&record.username) {
            return Err(TourError::DuplicateUsername(record.username));
        }

        let position = self.records.len();
        self.index.insert(record.username.clone(), position);
        self.records.push(record);
        Ok(&self.records[position])
    }

    pub fn find_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.index.get(username).map(|&i| &self.records[i])
    }

    pub fn find_by_username_mut(&mut self, username: &str) -> Option<&mut UserRecord> {
        match self.index.get(username) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    /// Check credentials: the username is looked up first, then the password compared
    pub fn authenticate(&self, username: &str, password: &str) -> TourResult<&UserRecord> {
        let record = self
            .find_by_username(username)
            .ok_or_else(|| TourError::UserNotFound(username.to_string()))?;

        if record.password != password {
            return Err(TourError::WrongPassword);
        }
        Ok(record)
    }

    /// Records in registration order
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
