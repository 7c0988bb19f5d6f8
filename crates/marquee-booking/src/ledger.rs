//! Booking ledger operations.
//!
//! Owns booking lifetime: create, modify, cancel. Every seat a booking
//! holds was taken from its showtime through
//! [`inventory::adjust_remaining_seats`], and every removal gives the seats
//! back, so remaining + booked always reconstructs the total fixed at
//! showtime creation.
//!
//! The two-table mutations here (seat count plus booking record) cannot be
//! written as one physical write. The discipline is: adjust seats first,
//! then write the booking table, and compensate the seat adjustment when
//! that second write fails, so a partially-applied operation never
//! survives the call.

use marquee_core::{fields, Booking, BookingStatus, Error, PaymentMethod, Result};
use marquee_store::next_id;

use crate::catalog;
use crate::cinema::{storage, Tables};
use crate::inventory;
use crate::receipt::Receipt;

pub(crate) fn create_booking(
    tables: &Tables,
    showtime_id: &str,
    customer_name: &str,
    seat_count: u32,
    payment: PaymentMethod,
) -> Result<(Booking, Receipt)> {
    let customer_name = fields::required("customer_name", customer_name)?;
    if seat_count == 0 {
        return Err(Error::InvalidInput {
            field: "seat_count",
            reason: "must be positive".into(),
        });
    }

    let showtime =
        inventory::find_showtime(tables, showtime_id)?.ok_or_else(|| Error::NotFound {
            entity: "showtime",
            id: showtime_id.trim().to_owned(),
        })?;

    inventory::adjust_remaining_seats(tables, &showtime.id, -i64::from(seat_count))?;

    let bookings = tables.bookings.load().map_err(storage)?;
    let booking = Booking {
        id: next_id(&bookings).parse()?,
        customer_name,
        showtime_id: showtime.id.clone(),
        seat_count,
        status: BookingStatus::Paid,
    };
    if let Err(err) = tables.bookings.append(&booking) {
        // Give the seats back so the failed append leaves no partial state.
        if let Err(restore) =
            inventory::adjust_remaining_seats(tables, &showtime.id, i64::from(seat_count))
        {
            tracing::error!(
                showtime = %showtime.id,
                error = %restore,
                "failed to restore seats after booking append failure"
            );
        }
        return Err(storage(err));
    }

    tracing::info!(
        booking = %booking.id,
        showtime = %showtime.id,
        seats = seat_count,
        payment = %payment,
        "booking created"
    );

    // The booking is already durable; a catalog hiccup only degrades the
    // receipt to the raw movie id.
    let movie_title = match catalog::find_movie(tables, showtime.movie_id.as_str()) {
        Ok(Some(movie)) => movie.title,
        Ok(None) => showtime.movie_id.to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "catalog unavailable while building receipt");
            showtime.movie_id.to_string()
        }
    };
    let receipt = Receipt {
        booking_id: booking.id.clone(),
        customer_name: booking.customer_name.clone(),
        movie_title,
        date: showtime.date,
        time: showtime.time,
        seat_count,
    };
    Ok((booking, receipt))
}

pub(crate) fn modify_booking(
    tables: &Tables,
    booking_id: &str,
    new_seat_count: u32,
    requester: Option<&str>,
) -> Result<Booking> {
    if new_seat_count == 0 {
        return Err(Error::InvalidInput {
            field: "seat_count",
            reason: "must be positive".into(),
        });
    }

    let mut bookings = tables.bookings.load().map_err(storage)?;
    let position = find_owned(&bookings, booking_id, requester)?;
    let old_seat_count = bookings[position].seat_count;
    let showtime_id = bookings[position].showtime_id.clone();

    // Modify requires a live showtime; only cancel tolerates an orphan.
    if inventory::find_showtime(tables, showtime_id.as_str())?.is_none() {
        return Err(Error::NotFound {
            entity: "showtime",
            id: showtime_id.to_string(),
        });
    }

    let delta = i64::from(new_seat_count) - i64::from(old_seat_count);
    if delta != 0 {
        inventory::adjust_remaining_seats(tables, &showtime_id, -delta)?;
    }

    bookings[position].seat_count = new_seat_count;
    let updated = bookings[position].clone();
    if let Err(err) = tables.bookings.replace_all(&bookings) {
        if delta != 0 {
            if let Err(restore) = inventory::adjust_remaining_seats(tables, &showtime_id, delta) {
                tracing::error!(
                    showtime = %showtime_id,
                    error = %restore,
                    "failed to restore seats after booking rewrite failure"
                );
            }
        }
        return Err(storage(err));
    }

    tracing::info!(
        booking = %updated.id,
        seats = new_seat_count,
        "booking modified"
    );
    Ok(updated)
}

pub(crate) fn cancel_booking(
    tables: &Tables,
    booking_id: &str,
    requester: Option<&str>,
) -> Result<()> {
    let mut bookings = tables.bookings.load().map_err(storage)?;
    let position = find_owned(&bookings, booking_id, requester)?;
    let booking = bookings.remove(position);

    // Orphan-tolerant cancel: when the showtime is already gone the seats
    // cannot be restored anywhere, but the booking is still removed.
    let restored = if inventory::find_showtime(tables, booking.showtime_id.as_str())?.is_some() {
        inventory::adjust_remaining_seats(
            tables,
            &booking.showtime_id,
            i64::from(booking.seat_count),
        )?;
        true
    } else {
        tracing::warn!(
            booking = %booking.id,
            showtime = %booking.showtime_id,
            "cancelling booking for a missing showtime; seat restoration skipped"
        );
        false
    };

    if let Err(err) = tables.bookings.replace_all(&bookings) {
        if restored {
            if let Err(undo) = inventory::adjust_remaining_seats(
                tables,
                &booking.showtime_id,
                -i64::from(booking.seat_count),
            ) {
                tracing::error!(
                    showtime = %booking.showtime_id,
                    error = %undo,
                    "failed to undo seat restoration after cancel rewrite failure"
                );
            }
        }
        return Err(storage(err));
    }

    tracing::info!(booking = %booking.id, "booking cancelled");
    Ok(())
}

pub(crate) fn list_bookings(tables: &Tables) -> Result<Vec<Booking>> {
    tables.bookings.load().map_err(storage)
}

/// Bookings made under the given name (case-insensitive).
pub(crate) fn bookings_for_customer(tables: &Tables, name: &str) -> Result<Vec<Booking>> {
    let mut bookings = tables.bookings.load().map_err(storage)?;
    bookings.retain(|b| b.is_owned_by(name));
    Ok(bookings)
}

/// Locate a booking and enforce the ownership rule.
///
/// When a requester identity is supplied it must match the booking's
/// customer name case-insensitively; this is the core's only authorization
/// check, used by self-service callers. Clerk flows pass `None`.
fn find_owned(bookings: &[Booking], booking_id: &str, requester: Option<&str>) -> Result<usize> {
    let booking_id = booking_id.trim();
    let position = bookings
        .iter()
        .position(|b| b.id.as_str() == booking_id)
        .ok_or_else(|| Error::NotFound {
            entity: "booking",
            id: booking_id.to_owned(),
        })?;
    if let Some(requester) = requester {
        if !bookings[position].is_owned_by(requester) {
            return Err(Error::NotOwner {
                booking_id: booking_id.to_owned(),
            });
        }
    }
    Ok(position)
}
