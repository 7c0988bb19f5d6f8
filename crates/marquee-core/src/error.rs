//! Error types for marquee operations.

use crate::ids::IdError;

/// Result type for marquee operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in booking and inventory operations.
///
/// Every operation returns one of these discriminants instead of panicking;
/// the presentation shell is responsible for rendering the message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed operation input (bad date/time, blank required field,
    /// embedded separator, non-positive count).
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// The input field that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The referenced movie is missing or not in `Active` status.
    #[error("movie unavailable: {movie_id}")]
    MovieUnavailable {
        /// The movie ID that was referenced.
        movie_id: String,
    },

    /// The referenced auditorium does not exist.
    #[error("unknown auditorium: {auditorium_id}")]
    UnknownAuditorium {
        /// The auditorium ID that was referenced.
        auditorium_id: String,
    },

    /// The addressed record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record ("movie", "showtime", "booking", ...).
        entity: &'static str,
        /// The ID that was looked up.
        id: String,
    },

    /// Another showtime already occupies the auditorium at that instant.
    #[error("auditorium {auditorium_id} already scheduled at {date} {time}")]
    ScheduleConflict {
        /// The contested auditorium.
        auditorium_id: String,
        /// Date of the contested slot.
        date: String,
        /// Time of the contested slot.
        time: String,
    },

    /// The showtime does not have enough remaining seats.
    #[error("insufficient seats: remaining={remaining}, requested={requested}")]
    InsufficientSeats {
        /// Seats still available on the showtime.
        remaining: u32,
        /// Seats the operation asked for.
        requested: u32,
    },

    /// A record with the same unique key already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// The kind of record.
        entity: &'static str,
        /// The duplicate key.
        id: String,
    },

    /// The record still has dependents and cannot be deleted.
    #[error("{entity} {id} still has dependent records")]
    HasDependents {
        /// The kind of record the delete was aimed at.
        entity: &'static str,
        /// The ID of the record.
        id: String,
    },

    /// The requester does not own the booking it tried to manage.
    #[error("booking {booking_id} is not owned by the requester")]
    NotOwner {
        /// The booking that was addressed.
        booking_id: String,
    },

    /// The persistence medium failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
