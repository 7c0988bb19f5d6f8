//! Showtime inventory types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{AuditoriumId, MovieId, ShowtimeId};

/// Date format of the persisted tables and operation input (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format of the persisted tables and operation input (`HH:MM`).
pub const TIME_FORMAT: &str = "%H:%M";

/// A scheduled screening with its remaining-seat count.
///
/// `remaining_seats` is the single mutable source of truth for capacity: the
/// total fixed at creation is never stored separately and is reconstructed
/// as remaining plus the seats of all active bookings. Consequently the
/// count may only move together with a booking change, through the ledger's
/// seat-adjustment path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showtime {
    /// Unique showtime ID (decimal sequence).
    pub id: ShowtimeId,

    /// The movie being screened.
    pub movie_id: MovieId,

    /// The auditorium hosting the screening.
    pub auditorium_id: AuditoriumId,

    /// Calendar date of the screening.
    pub date: NaiveDate,

    /// Start time (minute precision).
    pub time: NaiveTime,

    /// Seats still available for sale. Never negative; never exceeds the
    /// total fixed at creation.
    pub remaining_seats: u32,

    /// Base ticket price in cents.
    pub base_price_cents: i64,
}

impl Showtime {
    /// Whether this showtime occupies the given auditorium slot.
    ///
    /// At most one showtime may occupy a `(auditorium, date, time)` triple.
    #[must_use]
    pub fn occupies(&self, auditorium_id: &AuditoriumId, date: NaiveDate, time: NaiveTime) -> bool {
        self.auditorium_id == *auditorium_id && self.date == date && self.time == time
    }
}

/// Parse an ISO `YYYY-MM-DD` date from operation input.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the value is not a valid calendar
/// date in that format.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| Error::InvalidInput {
        field: "date",
        reason: format!("expected YYYY-MM-DD, got {input:?}"),
    })
}

/// Parse an `HH:MM` time from operation input.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the value is not a valid time of day
/// in that format.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| Error::InvalidInput {
        field: "time",
        reason: format!("expected HH:MM, got {input:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_datetime() {
        let date = parse_date("2025-02-28").unwrap();
        assert_eq!(date.to_string(), "2025-02-28");
        let time = parse_time("19:30").unwrap();
        assert_eq!(time.format(TIME_FORMAT).to_string(), "19:30");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("28-02-2025").is_err());
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("7pm").is_err());
    }

    #[test]
    fn slot_occupancy() {
        let aud = AuditoriumId::new("AUD1").unwrap();
        let show = Showtime {
            id: ShowtimeId::new("1").unwrap(),
            movie_id: MovieId::new("1").unwrap(),
            auditorium_id: aud.clone(),
            date: parse_date("2025-06-01").unwrap(),
            time: parse_time("20:00").unwrap(),
            remaining_seats: 50,
            base_price_cents: 1200,
        };
        assert!(show.occupies(&aud, show.date, show.time));
        assert!(!show.occupies(&aud, show.date, parse_time("21:00").unwrap()));
        let other = AuditoriumId::new("AUD2").unwrap();
        assert!(!show.occupies(&other, show.date, show.time));
    }
}
