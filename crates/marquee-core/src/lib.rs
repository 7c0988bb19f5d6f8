//! Core types for the marquee cinema booking system.
//!
//! This crate provides the foundational types used throughout the marquee
//! workspace:
//!
//! - **Identifiers**: `MovieId`, `AuditoriumId`, `ShowtimeId`, `BookingId`
//! - **Catalog**: `Movie`, `MovieStatus`, `Auditorium`
//! - **Inventory**: `Showtime` with its remaining-seat count
//! - **Ledger**: `Booking`, `BookingStatus`, `PaymentMethod`
//!
//! # Money
//!
//! Prices are held as **integer cents** (`i64`) to avoid floating point
//! precision issues, and rendered as decimal strings (`12.50`) at the
//! persistence boundary. See [`price`].
//!
//! # Persistence format
//!
//! Records are persisted as [`FIELD_SEPARATOR`]-delimited rows, so the
//! separator is forbidden inside every field value. Validated constructors
//! and the [`fields`] helpers enforce this at the operation boundary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auditorium;
pub mod booking;
pub mod error;
pub mod fields;
pub mod ids;
pub mod movie;
pub mod payment;
pub mod price;
pub mod showtime;

pub use auditorium::Auditorium;
pub use booking::{Booking, BookingStatus};
pub use error::{Error, Result};
pub use ids::{AuditoriumId, BookingId, IdError, MovieId, ShowtimeId};
pub use movie::{Movie, MovieStatus};
pub use payment::PaymentMethod;
pub use showtime::{parse_date, parse_time, Showtime, DATE_FORMAT, TIME_FORMAT};

/// The field separator of the persisted table format.
///
/// Field values must never contain this character; see [`fields`].
pub const FIELD_SEPARATOR: char = ',';
