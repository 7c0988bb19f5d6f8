//! Booking ledger integration tests.

mod common;

use std::fs;

use common::{FailingSink, RecordingSink, TestCinema};
use marquee_booking::Cinema;
use marquee_core::{Error, PaymentMethod};

// ============================================================================
// Create / modify / cancel flow
// ============================================================================

#[test]
fn booking_flow_conserves_seats() {
    // Showtime with 50 seats: book 10, fail to book 45, shrink to 5, cancel.
    let (harness, showtime) = TestCinema::seeded(50);
    let sid = showtime.id.as_str();

    let booking = harness
        .cinema
        .create_booking(sid, "Alice", 10, PaymentMethod::Cash)
        .unwrap();
    assert_eq!(booking.seat_count, 10);
    assert_eq!(
        harness.cinema.find_showtime(sid).unwrap().unwrap().remaining_seats,
        40
    );
    harness.assert_conserved(sid, 50);

    let err = harness
        .cinema
        .create_booking(sid, "Bob", 45, PaymentMethod::Cash)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientSeats {
            remaining: 40,
            requested: 45
        }
    ));
    assert_eq!(
        harness.cinema.find_showtime(sid).unwrap().unwrap().remaining_seats,
        40
    );
    harness.assert_conserved(sid, 50);

    let modified = harness
        .cinema
        .modify_booking(booking.id.as_str(), 5, None)
        .unwrap();
    assert_eq!(modified.seat_count, 5);
    assert_eq!(
        harness.cinema.find_showtime(sid).unwrap().unwrap().remaining_seats,
        45
    );
    harness.assert_conserved(sid, 50);

    harness
        .cinema
        .cancel_booking(booking.id.as_str(), None)
        .unwrap();
    assert_eq!(
        harness.cinema.find_showtime(sid).unwrap().unwrap().remaining_seats,
        50
    );
    assert!(harness.cinema.list_bookings().unwrap().is_empty());
}

#[test]
fn growing_a_booking_checks_capacity() {
    let (harness, showtime) = TestCinema::seeded(20);
    let sid = showtime.id.as_str();

    let booking = harness
        .cinema
        .create_booking(sid, "Alice", 5, PaymentMethod::Cash)
        .unwrap();
    harness
        .cinema
        .create_booking(sid, "Bob", 12, PaymentMethod::Cash)
        .unwrap();

    // 3 seats remain; growing Alice from 5 to 9 needs 4 more.
    let err = harness
        .cinema
        .modify_booking(booking.id.as_str(), 9, None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientSeats {
            remaining: 3,
            requested: 4
        }
    ));
    harness.assert_conserved(sid, 20);

    // Growing to exactly the remaining capacity works.
    harness
        .cinema
        .modify_booking(booking.id.as_str(), 8, None)
        .unwrap();
    assert_eq!(
        harness.cinema.find_showtime(sid).unwrap().unwrap().remaining_seats,
        0
    );
    harness.assert_conserved(sid, 20);
}

#[test]
fn second_cancel_is_not_found_and_changes_nothing() {
    let (harness, showtime) = TestCinema::seeded(50);
    let booking = harness
        .cinema
        .create_booking(showtime.id.as_str(), "Alice", 10, PaymentMethod::Cash)
        .unwrap();

    harness
        .cinema
        .cancel_booking(booking.id.as_str(), None)
        .unwrap();
    let err = harness
        .cinema
        .cancel_booking(booking.id.as_str(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            entity: "booking",
            ..
        }
    ));
    assert_eq!(
        harness
            .cinema
            .find_showtime(showtime.id.as_str())
            .unwrap()
            .unwrap()
            .remaining_seats,
        50
    );
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn booking_input_is_validated() {
    let (harness, showtime) = TestCinema::seeded(50);
    let sid = showtime.id.as_str();

    assert!(matches!(
        harness
            .cinema
            .create_booking(sid, "Alice", 0, PaymentMethod::Cash)
            .unwrap_err(),
        Error::InvalidInput {
            field: "seat_count",
            ..
        }
    ));
    assert!(matches!(
        harness
            .cinema
            .create_booking(sid, "   ", 2, PaymentMethod::Cash)
            .unwrap_err(),
        Error::InvalidInput {
            field: "customer_name",
            ..
        }
    ));
    assert!(matches!(
        harness
            .cinema
            .create_booking(sid, "Alice,Bob", 2, PaymentMethod::Cash)
            .unwrap_err(),
        Error::InvalidInput {
            field: "customer_name",
            ..
        }
    ));
    assert!(matches!(
        harness
            .cinema
            .create_booking("99", "Alice", 2, PaymentMethod::Cash)
            .unwrap_err(),
        Error::NotFound {
            entity: "showtime",
            ..
        }
    ));

    // No seats moved, no bookings appeared.
    assert_eq!(
        harness.cinema.find_showtime(sid).unwrap().unwrap().remaining_seats,
        50
    );
    assert!(harness.cinema.list_bookings().unwrap().is_empty());
}

#[test]
fn card_payment_is_format_checked() {
    let (harness, showtime) = TestCinema::seeded(50);

    let payment = PaymentMethod::card("1234-5678-9012-3456").unwrap();
    harness
        .cinema
        .create_booking(showtime.id.as_str(), "Alice", 2, payment)
        .unwrap();

    assert!(PaymentMethod::card("1234 5678 9012 3456").is_err());
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn self_service_requires_matching_name() {
    let (harness, showtime) = TestCinema::seeded(50);
    let booking = harness
        .cinema
        .create_booking(showtime.id.as_str(), "Alice", 10, PaymentMethod::Cash)
        .unwrap();
    let bid = booking.id.as_str();

    // Wrong requester: rejected, nothing changes.
    let err = harness.cinema.modify_booking(bid, 5, Some("Mallory")).unwrap_err();
    assert!(matches!(err, Error::NotOwner { .. }));
    let err = harness.cinema.cancel_booking(bid, Some("Mallory")).unwrap_err();
    assert!(matches!(err, Error::NotOwner { .. }));
    assert_eq!(
        harness
            .cinema
            .find_showtime(showtime.id.as_str())
            .unwrap()
            .unwrap()
            .remaining_seats,
        40
    );
    assert_eq!(harness.cinema.list_bookings().unwrap().len(), 1);

    // The match is case-insensitive.
    harness.cinema.modify_booking(bid, 5, Some("ALICE")).unwrap();
    harness.cinema.cancel_booking(bid, Some("alice")).unwrap();
    assert!(harness.cinema.list_bookings().unwrap().is_empty());
}

#[test]
fn customer_listing_matches_case_insensitively() {
    let (harness, showtime) = TestCinema::seeded(50);
    let sid = showtime.id.as_str();
    harness
        .cinema
        .create_booking(sid, "Alice", 2, PaymentMethod::Cash)
        .unwrap();
    harness
        .cinema
        .create_booking(sid, "Bob", 3, PaymentMethod::Cash)
        .unwrap();

    let mine = harness.cinema.bookings_for_customer("alice").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].customer_name, "Alice");
    assert!(harness.cinema.bookings_for_customer("carol").unwrap().is_empty());
}

// ============================================================================
// Orphaned bookings
// ============================================================================

#[test]
fn cancel_tolerates_missing_showtime_but_modify_does_not() {
    let (harness, showtime) = TestCinema::seeded(50);
    let sid = showtime.id.as_str();
    let first = harness
        .cinema
        .create_booking(sid, "Alice", 10, PaymentMethod::Cash)
        .unwrap();
    let second = harness
        .cinema
        .create_booking(sid, "Bob", 5, PaymentMethod::Cash)
        .unwrap();

    // Orphan the bookings by gutting the showtime table behind the core's
    // back (deletes through the API are blocked while bookings exist).
    let showtimes_path = harness.temp_dir.path().join("data").join("showtimes.csv");
    fs::write(
        &showtimes_path,
        "show_id,movie_id,aud_id,date,time,remaining_seats,base_price\n",
    )
    .unwrap();

    let err = harness
        .cinema
        .modify_booking(first.id.as_str(), 4, None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            entity: "showtime",
            ..
        }
    ));

    // Cancel still removes the record; there is nowhere to restore seats.
    harness.cinema.cancel_booking(first.id.as_str(), None).unwrap();
    let remaining = harness.cinema.list_bookings().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert!(harness.cinema.list_showtimes().unwrap().is_empty());
}

// ============================================================================
// Receipts
// ============================================================================

#[test]
fn successful_booking_emits_receipt() {
    let harness = TestCinema::new();
    let sink = RecordingSink::default();
    let issued = sink.issued.clone();
    let cinema = Cinema::open(harness.temp_dir.path().join("with-receipts"))
        .unwrap()
        .with_receipts(sink);

    let movie = cinema
        .add_movie("Arrival", "PG-13", 116, "English", marquee_core::MovieStatus::Active)
        .unwrap();
    cinema.add_auditorium("AUD1", "Main Hall").unwrap();
    let showtime = cinema
        .create_showtime(movie.id.as_str(), "AUD1", "2025-06-01", "19:30", 50, 1250)
        .unwrap();
    let booking = cinema
        .create_booking(showtime.id.as_str(), "Alice", 2, PaymentMethod::Cash)
        .unwrap();

    let receipts = issued.lock().unwrap();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].booking_id, booking.id);
    assert_eq!(receipts[0].movie_title, "Arrival");
    assert_eq!(receipts[0].seat_count, 2);

    // Failed bookings never reach the sink.
    drop(receipts);
    let _ = cinema.create_booking(showtime.id.as_str(), "Bob", 99, PaymentMethod::Cash);
    assert_eq!(issued.lock().unwrap().len(), 1);
}

#[test]
fn receipt_failure_does_not_roll_back_booking() {
    let harness = TestCinema::new();
    let cinema = Cinema::open(harness.temp_dir.path().join("bad-sink"))
        .unwrap()
        .with_receipts(FailingSink);

    let movie = cinema
        .add_movie("Arrival", "PG-13", 116, "English", marquee_core::MovieStatus::Active)
        .unwrap();
    cinema.add_auditorium("AUD1", "Main Hall").unwrap();
    let showtime = cinema
        .create_showtime(movie.id.as_str(), "AUD1", "2025-06-01", "19:30", 50, 1250)
        .unwrap();

    let booking = cinema
        .create_booking(showtime.id.as_str(), "Alice", 2, PaymentMethod::Cash)
        .unwrap();
    assert_eq!(cinema.list_bookings().unwrap().len(), 1);
    assert_eq!(booking.seat_count, 2);
    assert_eq!(
        cinema
            .find_showtime(showtime.id.as_str())
            .unwrap()
            .unwrap()
            .remaining_seats,
        48
    );
}
