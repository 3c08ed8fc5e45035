use std::io;

use serde::{Deserialize, Serialize};

use crate::modules::auth::password::validate_username;
use crate::modules::auth::store::{UserRecord, UserStore};
use crate::modules::booking::Booking;
use crate::modules::error::{TourError, TourResult};
use crate::NO_BOOKING;

/// On-disk shape of one user: the five logical fields, one JSON object per line
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub username: String,
    pub password: String,
    pub place: String,
    pub price: f64,
    pub tickets: u32,
}

impl From<&UserRecord> for StoredRecord {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            password: record.password.clone(),
            place: record.booked_place().to_string(),
            price: record.price_per_ticket(),
            tickets: record.ticket_count(),
        }
    }
}

impl StoredRecord {
    /// Turn the flat triple back into an optional booking, enforcing that
    /// place, price and ticket count are either all empty or all set
    pub fn into_record(self) -> Result<UserRecord, String> {
        validate_username(&self.username).map_err(|e| e.to_string())?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("invalid price {}", self.price));
        }

        let no_place = self.place == NO_BOOKING;
        let no_price = self.price == 0.0;
        let no_tickets = self.tickets == 0;

        let booking = match (no_place, no_price, no_tickets) {
            (true, true, true) => None,
            (false, false, false) => Some(Booking {
                place: self.place,
                price: self.price,
                tickets: self.tickets,
            }),
            _ => {
                return Err(format!(
                    "inconsistent booking (place '{}', price {}, tickets {})",
                    self.place, self.price, self.tickets
                ))
            }
        };

        Ok(UserRecord {
            username: self.username,
            password: self.password,
            booking,
        })
    }
}

/// Serialize one record as a single line without the trailing newline
pub fn encode_record(record: &UserRecord) -> TourResult<String> {
    serde_json::to_string(&StoredRecord::from(record)).map_err(|e| io::Error::from(e).into())
}

/// Serialize the whole store, one line per record in registration order
pub fn encode_store(store: &UserStore) -> TourResult<String> {
    let mut data = String::new();
    for record in store.records() {
        data.push_str(&encode_record(record)?);
        data.push('\n');
    }
    Ok(data)
}

/// Parse one line; `line` is 1-based and only used for error reporting
pub fn decode_line(text: &str, line: usize) -> TourResult<UserRecord> {
    let stored: StoredRecord = serde_json::from_str(text).map_err(|e| TourError::CorruptRecord {
        line,
        reason: e.to_string(),
    })?;
    stored
        .into_record()
        .map_err(|reason| TourError::CorruptRecord { line, reason })
}

/// Parse a whole data file. Blank lines are skipped; any bad line or repeated
/// username rejects the file.
pub fn decode_store(data: &str) -> TourResult<UserStore> {
    let mut store = UserStore::new();
    for (i, text) in data.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        let record = decode_line(text, i + 1)?;
        store.insert(record).map_err(|e| TourError::CorruptRecord {
            line: i + 1,
            reason: e.to_string(),
        })?;
    }
    Ok(store)
}
