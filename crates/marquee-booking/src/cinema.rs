//! The `Cinema` façade: one handle over all four table stores.
//!
//! Every operation, reads included so they observe a consistent snapshot,
//! runs under a single exclusive lock. Booking operations touch both the
//! showtime and booking tables and catalog/inventory operations validate
//! against each other's tables, so one lock over the whole set both
//! serializes the read-modify-replace critical sections and rules out
//! lock-ordering hazards between components. Operations never block on
//! anything but this lock; there are no waits inside a critical section.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use marquee_core::{
    Auditorium, Booking, Error, Movie, MovieStatus, PaymentMethod, Result, Showtime,
};
use marquee_store::{Record, StoreError, TableFile};

use crate::config::CinemaConfig;
use crate::receipt::{ReceiptSink, TextReceipts};
use crate::{catalog, inventory, ledger};

/// The table handles shared by catalog, inventory, and ledger operations.
pub(crate) struct Tables {
    pub(crate) movies: TableFile<Movie>,
    pub(crate) auditoriums: TableFile<Auditorium>,
    pub(crate) showtimes: TableFile<Showtime>,
    pub(crate) bookings: TableFile<Booking>,
}

/// Map a storage failure into the operation error space.
pub(crate) fn storage(err: StoreError) -> Error {
    Error::Storage(err.to_string())
}

/// A cinema's booking system: catalog, showtime inventory, and booking
/// ledger over one data directory.
///
/// `Cinema` is `Send + Sync`; clones of an `Arc<Cinema>` can serve
/// concurrent clerk, customer, and technician terminals. See the module
/// docs for the locking discipline.
pub struct Cinema {
    tables: Mutex<Tables>,
    receipts: Option<Box<dyn ReceiptSink>>,
}

impl Cinema {
    /// Open the booking system over a data directory, creating the
    /// directory and any missing table files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the directory or a table file cannot
    /// be created.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .map_err(|e| Error::Storage(format!("failed to create {}: {e}", data_dir.display())))?;

        let table_path = |table: &str| data_dir.join(format!("{table}.csv"));
        let tables = Tables {
            movies: TableFile::open(table_path(Movie::TABLE)).map_err(storage)?,
            auditoriums: TableFile::open(table_path(Auditorium::TABLE)).map_err(storage)?,
            showtimes: TableFile::open(table_path(Showtime::TABLE)).map_err(storage)?,
            bookings: TableFile::open(table_path(Booking::TABLE)).map_err(storage)?,
        };
        tracing::info!(data_dir = %data_dir.display(), "cinema store opened");
        Ok(Self {
            tables: Mutex::new(tables),
            receipts: None,
        })
    }

    /// Open the booking system described by a [`CinemaConfig`], wiring the
    /// text receipt sink when a receipt directory is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when a directory or table file cannot be
    /// created.
    pub fn from_config(config: &CinemaConfig) -> Result<Self> {
        let cinema = Self::open(&config.data_dir)?;
        match &config.receipt_dir {
            Some(dir) => {
                let sink = TextReceipts::new(dir).map_err(|e| {
                    Error::Storage(format!("failed to create {}: {e}", dir.display()))
                })?;
                Ok(cinema.with_receipts(sink))
            }
            None => {
                tracing::warn!("no receipt directory configured; receipts will not be written");
                Ok(cinema)
            }
        }
    }

    /// Attach a receipt sink for successful bookings.
    #[must_use]
    pub fn with_receipts(mut self, sink: impl ReceiptSink + 'static) -> Self {
        self.receipts = Some(Box::new(sink));
        self
    }

    /// Run one operation under the store lock.
    ///
    /// A poisoned lock is recovered: the guard holds only file handles, so
    /// a panicking thread cannot leave in-memory state behind, and on-disk
    /// state is consistent after every completed table write.
    fn locked<T>(&self, op: impl FnOnce(&Tables) -> Result<T>) -> Result<T> {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        op(&tables)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Register an auditorium under an operator-chosen id.
    ///
    /// # Errors
    ///
    /// Validation, duplicate-id, and storage errors per [`Error`].
    pub fn add_auditorium(&self, id: &str, name: &str) -> Result<Auditorium> {
        self.locked(|t| catalog::add_auditorium(t, id, name))
    }

    /// All auditoriums in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn list_auditoriums(&self) -> Result<Vec<Auditorium>> {
        self.locked(catalog::list_auditoriums)
    }

    /// Whether an auditorium with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn auditorium_exists(&self, id: &str) -> Result<bool> {
        self.locked(|t| catalog::auditorium_exists(t, id))
    }

    /// Add a movie to the catalog, allocating its id.
    ///
    /// # Errors
    ///
    /// Validation and storage errors per [`Error`].
    pub fn add_movie(
        &self,
        title: &str,
        rating: &str,
        duration_min: u32,
        language: &str,
        status: MovieStatus,
    ) -> Result<Movie> {
        self.locked(|t| catalog::add_movie(t, title, rating, duration_min, language, status))
    }

    /// Replace a movie's reference data.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the id is absent, plus validation and
    /// storage errors.
    pub fn update_movie(
        &self,
        id: &str,
        title: &str,
        rating: &str,
        duration_min: u32,
        language: &str,
        status: MovieStatus,
    ) -> Result<Movie> {
        self.locked(|t| catalog::update_movie(t, id, title, rating, duration_min, language, status))
    }

    /// Remove a movie from the catalog.
    ///
    /// # Errors
    ///
    /// [`Error::HasDependents`] while any showtime references the movie;
    /// [`Error::NotFound`] when the id is absent.
    pub fn delete_movie(&self, id: &str) -> Result<()> {
        self.locked(|t| catalog::delete_movie(t, id))
    }

    /// All movies in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn list_movies(&self) -> Result<Vec<Movie>> {
        self.locked(catalog::list_movies)
    }

    /// Look up one movie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn find_movie(&self, id: &str) -> Result<Option<Movie>> {
        self.locked(|t| catalog::find_movie(t, id))
    }

    /// Whether the movie exists and is in `Active` status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn is_movie_active(&self, id: &str) -> Result<bool> {
        self.locked(|t| catalog::is_movie_active(t, id))
    }

    // =========================================================================
    // Showtime inventory
    // =========================================================================

    /// Schedule a showtime, fixing its seat total.
    ///
    /// # Errors
    ///
    /// [`Error::MovieUnavailable`] / [`Error::UnknownAuditorium`] for bad
    /// references, [`Error::InvalidInput`] for bad formats,
    /// [`Error::ScheduleConflict`] when the auditorium slot is taken.
    pub fn create_showtime(
        &self,
        movie_id: &str,
        auditorium_id: &str,
        date: &str,
        time: &str,
        seat_total: u32,
        base_price_cents: i64,
    ) -> Result<Showtime> {
        self.locked(|t| {
            inventory::create_showtime(
                t,
                movie_id,
                auditorium_id,
                date,
                time,
                seat_total,
                base_price_cents,
            )
        })
    }

    /// Reschedule a showtime; the remaining-seat count is untouched.
    ///
    /// # Errors
    ///
    /// As [`Cinema::create_showtime`], plus [`Error::NotFound`] when the id
    /// is absent. The overlap check excludes the showtime itself.
    pub fn update_showtime(
        &self,
        id: &str,
        movie_id: &str,
        auditorium_id: &str,
        date: &str,
        time: &str,
        base_price_cents: i64,
    ) -> Result<Showtime> {
        self.locked(|t| {
            inventory::update_showtime(
                t,
                id,
                movie_id,
                auditorium_id,
                date,
                time,
                base_price_cents,
            )
        })
    }

    /// Remove a showtime.
    ///
    /// # Errors
    ///
    /// [`Error::HasDependents`] while any booking references it;
    /// [`Error::NotFound`] when the id is absent.
    pub fn delete_showtime(&self, id: &str) -> Result<()> {
        self.locked(|t| inventory::delete_showtime(t, id))
    }

    /// All showtimes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn list_showtimes(&self) -> Result<Vec<Showtime>> {
        self.locked(inventory::list_showtimes)
    }

    /// Look up one showtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn find_showtime(&self, id: &str) -> Result<Option<Showtime>> {
        self.locked(|t| inventory::find_showtime(t, id))
    }

    /// Showtimes on a given `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a bad date, [`Error::Storage`] on read
    /// failure.
    pub fn showtimes_on(&self, date: &str) -> Result<Vec<Showtime>> {
        self.locked(|t| inventory::showtimes_on(t, date))
    }

    /// Showtimes whose movie title contains the keyword (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a blank keyword, [`Error::Storage`] on
    /// read failure.
    pub fn showtimes_for_movie(&self, keyword: &str) -> Result<Vec<Showtime>> {
        self.locked(|t| inventory::showtimes_for_movie(t, keyword))
    }

    // =========================================================================
    // Booking ledger
    // =========================================================================

    /// Sell seats against a showtime.
    ///
    /// The seat decrement and the booking record are applied as one unit:
    /// when the showtime lacks capacity the booking is not created, and a
    /// failed booking write gives the seats back. A receipt goes to the
    /// configured sink fire-and-forget; sink failure never rolls back the
    /// booking.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientSeats`] when capacity is exhausted,
    /// [`Error::NotFound`] for an unknown showtime, [`Error::InvalidInput`]
    /// for a bad name, seat count, or payment.
    pub fn create_booking(
        &self,
        showtime_id: &str,
        customer_name: &str,
        seat_count: u32,
        payment: PaymentMethod,
    ) -> Result<Booking> {
        let (booking, receipt) = self.locked(|t| {
            ledger::create_booking(t, showtime_id, customer_name, seat_count, payment)
        })?;

        if let Some(sink) = &self.receipts {
            if let Err(err) = sink.issue(&receipt) {
                tracing::warn!(
                    booking = %receipt.booking_id,
                    error = %err,
                    "receipt delivery failed"
                );
            }
        }
        Ok(booking)
    }

    /// Change the seat count of a booking.
    ///
    /// With a `requester` identity the booking must belong to that customer
    /// (case-insensitive name match); clerk flows pass `None`.
    ///
    /// # Errors
    ///
    /// [`Error::NotOwner`] on an ownership mismatch,
    /// [`Error::InsufficientSeats`] when the increase does not fit,
    /// [`Error::NotFound`] for an unknown booking or a vanished showtime.
    pub fn modify_booking(
        &self,
        booking_id: &str,
        new_seat_count: u32,
        requester: Option<&str>,
    ) -> Result<Booking> {
        self.locked(|t| ledger::modify_booking(t, booking_id, new_seat_count, requester))
    }

    /// Cancel a booking, restoring its seats to the showtime.
    ///
    /// Ownership rules as in [`Cinema::modify_booking`]. When the showtime
    /// no longer exists the booking is still removed and the restoration is
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown booking (including a repeated
    /// cancel), [`Error::NotOwner`] on an ownership mismatch.
    pub fn cancel_booking(&self, booking_id: &str, requester: Option<&str>) -> Result<()> {
        self.locked(|t| ledger::cancel_booking(t, booking_id, requester))
    }

    /// All bookings in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.locked(ledger::list_bookings)
    }

    /// Bookings made under the given name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the table cannot be read.
    pub fn bookings_for_customer(&self, name: &str) -> Result<Vec<Booking>> {
        self.locked(|t| ledger::bookings_for_customer(t, name))
    }
}
