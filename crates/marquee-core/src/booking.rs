//! Booking ledger types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{BookingId, ShowtimeId};

/// A paid seat reservation against one showtime.
///
/// Bookings hold aggregate seat counts only; there is no seat-number
/// assignment. Cancellation deletes the record outright; no cancelled state
/// is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking ID (decimal sequence).
    pub id: BookingId,

    /// Name the booking was made under; the ownership check compares
    /// against this.
    pub customer_name: String,

    /// The showtime the seats were sold from.
    pub showtime_id: ShowtimeId,

    /// Number of seats held. Always positive.
    pub seat_count: u32,

    /// Payment status; `Paid` is the only persisted state.
    pub status: BookingStatus,
}

impl Booking {
    /// Whether `requester` owns this booking (case-insensitive name match).
    #[must_use]
    pub fn is_owned_by(&self, requester: &str) -> bool {
        self.customer_name.eq_ignore_ascii_case(requester.trim())
    }
}

/// Payment status of a booking.
///
/// Creation requires a successful (trivially-validated) payment step, so a
/// persisted booking is always `Paid`; there is no reserved-but-unpaid
/// intermediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Seats are paid for and counted against the showtime.
    #[serde(rename = "PAID")]
    Paid,
}

impl BookingStatus {
    /// The persisted label for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownBookingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(Self::Paid),
            other => Err(UnknownBookingStatus(other.to_owned())),
        }
    }
}

/// A status label other than `PAID`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownBookingStatus(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(name: &str) -> Booking {
        Booking {
            id: BookingId::new("1").unwrap(),
            customer_name: name.into(),
            showtime_id: ShowtimeId::new("1").unwrap(),
            seat_count: 2,
            status: BookingStatus::Paid,
        }
    }

    #[test]
    fn ownership_is_case_insensitive() {
        let b = booking("Alice");
        assert!(b.is_owned_by("alice"));
        assert!(b.is_owned_by("ALICE"));
        assert!(b.is_owned_by(" Alice "));
        assert!(!b.is_owned_by("bob"));
    }

    #[test]
    fn status_roundtrip() {
        assert_eq!("PAID".parse::<BookingStatus>().unwrap(), BookingStatus::Paid);
        assert!("paid".parse::<BookingStatus>().is_err());
        assert_eq!(BookingStatus::Paid.to_string(), "PAID");
    }
}
