//! Booking ledger and showtime inventory for marquee.
//!
//! This crate is the consistency core of the cinema system: it owns the
//! rules that keep seat counts conserved across concurrent create, modify,
//! and cancel operations, the monotonic id scheme derived from persisted
//! state, and the referential-integrity checks that block deletes with
//! dependents.
//!
//! The entry point is [`Cinema`], a thread-safe handle over one data
//! directory:
//!
//! ```no_run
//! use marquee_booking::Cinema;
//! use marquee_core::{MovieStatus, PaymentMethod};
//!
//! let cinema = Cinema::open("./data").unwrap();
//! let movie = cinema
//!     .add_movie("Arrival", "PG-13", 116, "English", MovieStatus::Active)
//!     .unwrap();
//! cinema.add_auditorium("AUD1", "Main Hall").unwrap();
//! let show = cinema
//!     .create_showtime(movie.id.as_str(), "AUD1", "2025-06-01", "19:30", 50, 1250)
//!     .unwrap();
//! let booking = cinema
//!     .create_booking(show.id.as_str(), "Alice", 2, PaymentMethod::Cash)
//!     .unwrap();
//! assert_eq!(booking.seat_count, 2);
//! ```
//!
//! Presentation shells (menus, terminals) and authentication live outside
//! this crate; self-service callers pass the authenticated customer name as
//! the `requester` of modify/cancel and the core enforces ownership, which
//! is its only authorization concern.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod catalog;
mod cinema;
pub mod config;
mod inventory;
mod ledger;
pub mod receipt;

pub use cinema::Cinema;
pub use config::CinemaConfig;
pub use receipt::{Receipt, ReceiptSink, TextReceipts};
