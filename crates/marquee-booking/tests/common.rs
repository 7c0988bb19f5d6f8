//! Common test utilities for marquee integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::io;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use marquee_booking::{Cinema, Receipt, ReceiptSink};
use marquee_core::{MovieStatus, Showtime};

/// Test harness holding a cinema over a fresh temporary data directory.
pub struct TestCinema {
    pub cinema: Cinema,
    /// Kept alive for the test duration.
    pub temp_dir: TempDir,
}

impl TestCinema {
    /// Create a harness with empty tables.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cinema = Cinema::open(temp_dir.path().join("data")).expect("Failed to open cinema");
        Self { cinema, temp_dir }
    }

    /// Create a harness pre-seeded with one active movie, one auditorium
    /// (`AUD1`), and one showtime with the given seat total.
    pub fn seeded(seat_total: u32) -> (Self, Showtime) {
        let harness = Self::new();
        let showtime = harness.seed_showtime(seat_total, "19:30");
        (harness, showtime)
    }

    /// Seed a movie/auditorium pair on first use and schedule a showtime at
    /// the given time on the stock date.
    pub fn seed_showtime(&self, seat_total: u32, time: &str) -> Showtime {
        let movie_id = match self
            .cinema
            .list_movies()
            .expect("Failed to list movies")
            .first()
        {
            Some(movie) => movie.id.to_string(),
            None => self
                .cinema
                .add_movie("Arrival", "PG-13", 116, "English", MovieStatus::Active)
                .expect("Failed to add movie")
                .id
                .to_string(),
        };
        if !self
            .cinema
            .auditorium_exists("AUD1")
            .expect("Failed to check auditorium")
        {
            self.cinema
                .add_auditorium("AUD1", "Main Hall")
                .expect("Failed to add auditorium");
        }
        self.cinema
            .create_showtime(&movie_id, "AUD1", "2025-06-01", time, seat_total, 1250)
            .expect("Failed to create showtime")
    }

    /// Assert the conservation invariant for one showtime: remaining plus
    /// the seats of all bookings referencing it equals the creation total.
    pub fn assert_conserved(&self, showtime_id: &str, seat_total: u32) {
        let showtime = self
            .cinema
            .find_showtime(showtime_id)
            .expect("Failed to load showtime")
            .expect("Showtime vanished");
        let booked: u32 = self
            .cinema
            .list_bookings()
            .expect("Failed to list bookings")
            .iter()
            .filter(|b| b.showtime_id.as_str() == showtime_id)
            .map(|b| b.seat_count)
            .sum();
        assert_eq!(
            showtime.remaining_seats + booked,
            seat_total,
            "seat conservation violated: remaining={} booked={booked}",
            showtime.remaining_seats
        );
    }
}

impl Default for TestCinema {
    fn default() -> Self {
        Self::new()
    }
}

/// Receipt sink that records everything it is handed.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub issued: Arc<Mutex<Vec<Receipt>>>,
}

impl ReceiptSink for RecordingSink {
    fn issue(&self, receipt: &Receipt) -> io::Result<()> {
        self.issued.lock().unwrap().push(receipt.clone());
        Ok(())
    }
}

/// Receipt sink that always fails delivery.
pub struct FailingSink;

impl ReceiptSink for FailingSink {
    fn issue(&self, _receipt: &Receipt) -> io::Result<()> {
        Err(io::Error::other("sink offline"))
    }
}
