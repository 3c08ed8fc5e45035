use log::warn;

use crate::modules::auth::store::{UserRecord, UserStore};
use crate::modules::booking::Booking;
use crate::modules::catalog::TOUR_CATALOG;
use crate::modules::error::{TourError, TourResult};
use crate::NO_BOOKING;

/// Split the middle tokens of a legacy line into (password, place).
///
/// The old writer joined `password place` with a single space and both could
/// contain spaces, so the place is recovered as the longest known name that
/// ends the token run. Unknown places fall back to the last token.
fn split_password_and_place(middle: &[&str]) -> (String, String) {
    let known = TOUR_CATALOG
        .iter()
        .map(|tour| tour.destination)
        .chain(std::iter::once(NO_BOOKING));

    let best = known
        .filter_map(|place| {
            let width = place.split_whitespace().count();
            if middle.len() <= width {
                return None;
            }
            let tail = middle[middle.len() - width..].join(" ");
            (tail == place).then_some(width)
        })
        .max();

    let width = best.unwrap_or(1);
    let split = middle.len() - width;
    (middle[..split].join(" "), middle[split..].join(" "))
}

/// Parse one line written by the legacy `username password place price tickets` format
pub fn parse_legacy_line(text: &str, line: usize) -> TourResult<UserRecord> {
    let corrupt = |reason: String| TourError::CorruptRecord { line, reason };

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(corrupt(format!("expected at least 5 fields, found {}", tokens.len())));
    }

    let n = tokens.len();
    let username = tokens[0].to_string();
    let price: f64 = tokens[n - 2]
        .parse()
        .map_err(|_| corrupt(format!("invalid price '{}'", tokens[n - 2])))?;
    let tickets: i64 = tokens[n - 1]
        .parse()
        .map_err(|_| corrupt(format!("invalid ticket count '{}'", tokens[n - 1])))?;
    let (password, place) = split_password_and_place(&tokens[1..n - 2]);

    // The legacy program treated any empty member of the triple as no booking
    let booking = if place == NO_BOOKING || price <= 0.0 || tickets <= 0 {
        if place != NO_BOOKING || price != 0.0 || tickets != 0 {
            warn!(
                "Legacy line {}: partial booking ({}, {}, {}) imported as no booking",
                line, place, price, tickets
            );
        }
        None
    } else {
        let tickets = u32::try_from(tickets)
            .map_err(|_| corrupt(format!("ticket count {} out of range", tickets)))?;
        Some(Booking {
            place,
            price,
            tickets,
        })
    };

    Ok(UserRecord {
        username,
        password,
        booking,
    })
}

/// Parse a whole legacy file into a store
pub fn parse_legacy_file(data: &str) -> TourResult<UserStore> {
    let mut store = UserStore::new();
    for (i, text) in data.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        let record = parse_legacy_line(text, i + 1)?;
        store.insert(record).map_err(|e| TourError::CorruptRecord {
            line: i + 1,
            reason: e.to_string(),
        })?;
    }
    Ok(store)
}
