use std::path::{Path, PathBuf};

use super::file::{load_or_empty, save_user_store, LoadSource};
use crate::modules::auth::store::{UserRecord, UserStore};
use crate::modules::booking::Booking;
use crate::modules::config::AppConfig;
use crate::modules::error::{TourError, TourResult};
use crate::modules::utils::logging::{log_auth_event, log_data_operation};

/// The user store bound to its data file. Every mutating call rewrites the
/// whole file before returning.
#[derive(Debug)]
pub struct PersistentStore {
    store: UserStore,
    path: PathBuf,
}

impl PersistentStore {
    /// Wrap an in-memory store without touching the disk
    pub fn new(store: UserStore, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    /// Load from the configured data file, degrading to an empty store
    pub fn open(config: &AppConfig) -> (Self, LoadSource) {
        let (store, source) = load_or_empty(config);
        (Self::new(store, config.users_file.clone()), source)
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> TourResult<()> {
        let resource = self.path.display().to_string();
        match save_user_store(&self.store, &self.path) {
            Ok(()) => {
                log_data_operation("save", "-", &resource, true, None);
                Ok(())
            }
            Err(e) => {
                log_data_operation("save", "-", &resource, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    pub fn find_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.store.find_by_username(username)
    }

    fn record_mut(&mut self, username: &str) -> TourResult<&mut UserRecord> {
        self.store
            .find_by_username_mut(username)
            .ok_or_else(|| TourError::UserNotFound(username.to_string()))
    }

    pub fn register(&mut self, username: &str, password: &str) -> TourResult<()> {
        let result = self.store.register(username, password).map(|_| ());
        match result {
            Ok(()) => {
                log_auth_event("register", username, true, None);
                self.save()
            }
            Err(e) => {
                log_auth_event("register", username, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    /// Early duplicate check so the menu can stop before asking for a password
    pub fn check_username_available(&self, username: &str) -> TourResult<()> {
        if self.store.find_by_username(username).is_none() {
            return Ok(());
        }
        let error = TourError::DuplicateUsername(username.to_string());
        log_auth_event("register", username, false, Some(&error.to_string()));
        Err(error)
    }

    /// Confirm the current password before a new one is asked for
    pub fn verify_current_password(&self, username: &str, current: &str) -> TourResult<()> {
        match self.store.authenticate(username, current) {
            Ok(_) => Ok(()),
            Err(e) => {
                log_auth_event("change-password", username, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    pub fn authenticate(&self, username: &str, password: &str) -> TourResult<&UserRecord> {
        let result = self.store.authenticate(username, password);
        match &result {
            Ok(_) => log_auth_event("login", username, true, None),
            Err(e) => log_auth_event("login", username, false, Some(&e.to_string())),
        }
        result
    }

    pub fn book(&mut self, username: &str, tour_number: i64, tickets: i64) -> TourResult<Booking> {
        let result = self
            .record_mut(username)
            .and_then(|record| record.book(tour_number, tickets).cloned());
        match result {
            Ok(booking) => {
                log_data_operation("book", username, &booking.place, true, None);
                self.save()?;
                Ok(booking)
            }
            Err(e) => {
                log_data_operation("book", username, "-", false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    /// Cancel the user's booking and return the refund
    pub fn cancel(&mut self, username: &str) -> TourResult<f64> {
        let record = self.record_mut(username)?;
        let place = record.booked_place().to_string();
        match record.cancel() {
            Ok(refund) => {
                log_data_operation("cancel", username, &place, true, None);
                self.save()?;
                Ok(refund)
            }
            Err(e) => {
                log_data_operation("cancel", username, &place, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    pub fn change_password(
        &mut self,
        username: &str,
        current: &str,
        new_password: &str,
    ) -> TourResult<()> {
        match self.record_mut(username)?.change_password(current, new_password) {
            Ok(()) => {
                log_auth_event("change-password", username, true, None);
                self.save()
            }
            Err(e) => {
                log_auth_event("change-password", username, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    pub fn total_cost(&self, username: &str) -> TourResult<f64> {
        self.store
            .find_by_username(username)
            .ok_or_else(|| TourError::UserNotFound(username.to_string()))?
            .total_cost()
    }
}
