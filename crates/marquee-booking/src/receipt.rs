//! Receipt emission.
//!
//! A successful booking produces a [`Receipt`] that is handed to the
//! configured [`ReceiptSink`] fire-and-forget: sink failures are logged and
//! never roll back the booking.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use marquee_core::showtime::{DATE_FORMAT, TIME_FORMAT};
use marquee_core::BookingId;

/// The facts a receipt carries about a completed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The booking that was created.
    pub booking_id: BookingId,
    /// Name the booking was made under.
    pub customer_name: String,
    /// Title of the booked movie; falls back to the raw movie id when the
    /// catalog row is gone.
    pub movie_title: String,
    /// Date of the screening.
    pub date: NaiveDate,
    /// Start time of the screening.
    pub time: NaiveTime,
    /// Seats booked.
    pub seat_count: u32,
}

/// Destination for receipts of successful bookings.
pub trait ReceiptSink: Send + Sync {
    /// Deliver one receipt.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when delivery fails; the caller logs it and
    /// moves on.
    fn issue(&self, receipt: &Receipt) -> io::Result<()>;
}

/// Receipt sink that renders plain-text receipts into a directory, one
/// `receipt_<booking_id>.txt` per booking.
pub struct TextReceipts {
    dir: PathBuf,
}

impl TextReceipts {
    /// Create the sink, creating the receipt directory when missing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl ReceiptSink for TextReceipts {
    fn issue(&self, receipt: &Receipt) -> io::Result<()> {
        let path = self.dir.join(format!("receipt_{}.txt", receipt.booking_id));
        let body = format!(
            "===== CINEMA BOOKING RECEIPT =====\n\
             Booking ID  : {}\n\
             Customer    : {}\n\
             Movie       : {}\n\
             Date        : {}\n\
             Time        : {}\n\
             Seats Booked: {}\n\
             Status      : PAID\n\
             ==================================\n\
             Thank you for booking with us!\n\
             Enjoy your movie!\n",
            receipt.booking_id,
            receipt.customer_name,
            receipt.movie_title,
            receipt.date.format(DATE_FORMAT),
            receipt.time.format(TIME_FORMAT),
            receipt.seat_count,
        );
        fs::write(path, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Receipt {
        Receipt {
            booking_id: "12".parse().unwrap(),
            customer_name: "Alice".into(),
            movie_title: "Arrival".into(),
            date: NaiveDate::parse_from_str("2025-06-01", DATE_FORMAT).unwrap(),
            time: NaiveTime::parse_from_str("19:30", TIME_FORMAT).unwrap(),
            seat_count: 2,
        }
    }

    #[test]
    fn writes_one_file_per_booking() {
        let dir = TempDir::new().unwrap();
        let sink = TextReceipts::new(dir.path().join("receipts")).unwrap();
        sink.issue(&sample()).unwrap();

        let body =
            fs::read_to_string(dir.path().join("receipts").join("receipt_12.txt")).unwrap();
        assert!(body.contains("Customer    : Alice"));
        assert!(body.contains("Movie       : Arrival"));
        assert!(body.contains("Seats Booked: 2"));
        assert!(body.contains("Status      : PAID"));
    }
}
