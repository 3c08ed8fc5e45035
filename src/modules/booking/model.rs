use crate::modules::auth::store::UserRecord;
use crate::modules::catalog::{find_by_number, is_catalog_place};
use crate::modules::error::{TourError, TourResult};

/// An active booking: the place, price per ticket and ticket count, always set together
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub place: String,
    pub price: f64,
    pub tickets: u32,
}

impl Booking {
    /// Price per ticket times ticket count
    pub fn total_cost(&self) -> f64 {
        self.price * f64::from(self.tickets)
    }
}

impl UserRecord {
    /// Book a catalog tour. Fails if a booking is already held, the tour number
    /// is outside 1..=10, or fewer than one ticket is requested.
    pub fn book(&mut self, tour_number: i64, tickets: i64) -> TourResult<&Booking> {
        if self.booking.is_some() {
            return Err(TourError::AlreadyBooked);
        }
        let tour = find_by_number(tour_number).ok_or(TourError::InvalidTourIndex(tour_number))?;
        if tickets <= 0 {
            return Err(TourError::ZeroTickets);
        }
        let tickets = u32::try_from(tickets).map_err(|_| TourError::TooManyTickets(tickets))?;

        Ok(&*self.booking.insert(Booking {
            place: tour.destination.to_string(),
            price: tour.price,
            tickets,
        }))
    }

    /// Drop the active booking and return the refund owed for it
    pub fn cancel(&mut self) -> TourResult<f64> {
        // A place that is not in the catalog counts as no booking at all
        match &self.booking {
            Some(booking) if is_catalog_place(&booking.place) => {
                let refund = booking.total_cost();
                self.booking = None;
                Ok(refund)
            }
            _ => Err(TourError::NoActiveBooking),
        }
    }

    pub fn total_cost(&self) -> TourResult<f64> {
        self.booking
            .as_ref()
            .map(Booking::total_cost)
            .ok_or(TourError::NoActiveBooking)
    }
}
