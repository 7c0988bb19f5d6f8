//! Showtime inventory operations.
//!
//! Owns the mapping from showtime to remaining-seat count and the
//! one-showtime-per-auditorium-slot rule. The seat count has exactly one
//! mutation path, [`adjust_remaining_seats`], which the booking ledger uses
//! for every create/modify/cancel; everything else treats showtimes as
//! immutable inventory.

use chrono::{NaiveDate, NaiveTime};

use marquee_core::{
    parse_date, parse_time, AuditoriumId, Error, MovieId, Result, Showtime, ShowtimeId,
    DATE_FORMAT, TIME_FORMAT,
};
use marquee_store::{find_by_key, next_id};

use crate::catalog;
use crate::cinema::{storage, Tables};

pub(crate) fn create_showtime(
    tables: &Tables,
    movie_id: &str,
    auditorium_id: &str,
    date: &str,
    time: &str,
    seat_total: u32,
    base_price_cents: i64,
) -> Result<Showtime> {
    let (movie_id, auditorium_id, date, time) =
        validate_slot(tables, movie_id, auditorium_id, date, time)?;
    if seat_total == 0 {
        return Err(Error::InvalidInput {
            field: "seat_total",
            reason: "must be positive".into(),
        });
    }
    if base_price_cents < 0 {
        return Err(Error::InvalidInput {
            field: "base_price",
            reason: "must not be negative".into(),
        });
    }

    let showtimes = tables.showtimes.load().map_err(storage)?;
    check_slot_free(&showtimes, &auditorium_id, date, time, None)?;

    let showtime = Showtime {
        id: next_id(&showtimes).parse()?,
        movie_id,
        auditorium_id,
        date,
        time,
        remaining_seats: seat_total,
        base_price_cents,
    };
    tables.showtimes.append(&showtime).map_err(storage)?;
    tracing::info!(
        showtime = %showtime.id,
        auditorium = %showtime.auditorium_id,
        seats = seat_total,
        "showtime created"
    );
    Ok(showtime)
}

/// Reschedule a showtime.
///
/// Re-validates everything `create_showtime` validates, with the overlap
/// check excluding the record itself. The remaining-seat count is carried
/// over untouched: seats move only together with booking changes.
pub(crate) fn update_showtime(
    tables: &Tables,
    id: &str,
    movie_id: &str,
    auditorium_id: &str,
    date: &str,
    time: &str,
    base_price_cents: i64,
) -> Result<Showtime> {
    let id = id.trim();
    let (movie_id, auditorium_id, date, time) =
        validate_slot(tables, movie_id, auditorium_id, date, time)?;
    if base_price_cents < 0 {
        return Err(Error::InvalidInput {
            field: "base_price",
            reason: "must not be negative".into(),
        });
    }

    let mut showtimes = tables.showtimes.load().map_err(storage)?;
    let position = showtimes
        .iter()
        .position(|s| s.id.as_str() == id)
        .ok_or_else(|| Error::NotFound {
            entity: "showtime",
            id: id.to_owned(),
        })?;
    check_slot_free(&showtimes, &auditorium_id, date, time, Some(id))?;

    let slot = &mut showtimes[position];
    slot.movie_id = movie_id;
    slot.auditorium_id = auditorium_id;
    slot.date = date;
    slot.time = time;
    slot.base_price_cents = base_price_cents;
    let updated = slot.clone();
    tables.showtimes.replace_all(&showtimes).map_err(storage)?;
    tracing::info!(showtime = %updated.id, "showtime rescheduled");
    Ok(updated)
}

pub(crate) fn delete_showtime(tables: &Tables, id: &str) -> Result<()> {
    let id = id.trim();

    let bookings = tables.bookings.load().map_err(storage)?;
    if bookings.iter().any(|b| b.showtime_id.as_str() == id) {
        return Err(Error::HasDependents {
            entity: "showtime",
            id: id.to_owned(),
        });
    }

    let mut showtimes = tables.showtimes.load().map_err(storage)?;
    let before = showtimes.len();
    showtimes.retain(|s| s.id.as_str() != id);
    if showtimes.len() == before {
        return Err(Error::NotFound {
            entity: "showtime",
            id: id.to_owned(),
        });
    }
    tables.showtimes.replace_all(&showtimes).map_err(storage)?;
    tracing::info!(showtime = %id, "showtime removed");
    Ok(())
}

/// Apply a signed delta to a showtime's remaining-seat count.
///
/// The only seat-count mutation path in the system. Returns the new count;
/// rejects any delta that would take the count negative, which is what
/// keeps the inventory invariant intact under every ledger operation.
pub(crate) fn adjust_remaining_seats(tables: &Tables, id: &ShowtimeId, delta: i64) -> Result<u32> {
    let mut showtimes = tables.showtimes.load().map_err(storage)?;
    let slot = showtimes
        .iter_mut()
        .find(|s| s.id == *id)
        .ok_or_else(|| Error::NotFound {
            entity: "showtime",
            id: id.to_string(),
        })?;

    let new_remaining = i64::from(slot.remaining_seats) + delta;
    if new_remaining < 0 {
        return Err(Error::InsufficientSeats {
            remaining: slot.remaining_seats,
            requested: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
        });
    }
    let new_remaining = u32::try_from(new_remaining).map_err(|_| Error::InvalidInput {
        field: "seat_delta",
        reason: "seat count out of range".into(),
    })?;

    slot.remaining_seats = new_remaining;
    tables.showtimes.replace_all(&showtimes).map_err(storage)?;
    Ok(new_remaining)
}

pub(crate) fn list_showtimes(tables: &Tables) -> Result<Vec<Showtime>> {
    tables.showtimes.load().map_err(storage)
}

pub(crate) fn find_showtime(tables: &Tables, id: &str) -> Result<Option<Showtime>> {
    let showtimes = tables.showtimes.load().map_err(storage)?;
    Ok(find_by_key(&showtimes, id.trim()).cloned())
}

/// Showtimes on a given date.
pub(crate) fn showtimes_on(tables: &Tables, date: &str) -> Result<Vec<Showtime>> {
    let date = parse_date(date)?;
    let mut showtimes = tables.showtimes.load().map_err(storage)?;
    showtimes.retain(|s| s.date == date);
    Ok(showtimes)
}

/// Showtimes whose movie title contains the keyword (case-insensitive).
pub(crate) fn showtimes_for_movie(tables: &Tables, keyword: &str) -> Result<Vec<Showtime>> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Err(Error::InvalidInput {
            field: "keyword",
            reason: "must not be blank".into(),
        });
    }

    let movies = catalog::list_movies(tables)?;
    let matching: Vec<&MovieId> = movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&keyword))
        .map(|m| &m.id)
        .collect();

    let mut showtimes = tables.showtimes.load().map_err(storage)?;
    showtimes.retain(|s| matching.contains(&&s.movie_id));
    Ok(showtimes)
}

/// Shared reference/format validation for create and reschedule.
fn validate_slot(
    tables: &Tables,
    movie_id: &str,
    auditorium_id: &str,
    date: &str,
    time: &str,
) -> Result<(MovieId, AuditoriumId, NaiveDate, NaiveTime)> {
    let movie_id: MovieId = movie_id.trim().parse()?;
    let auditorium_id: AuditoriumId = auditorium_id.trim().parse()?;
    let date = parse_date(date)?;
    let time = parse_time(time)?;

    if !catalog::is_movie_active(tables, movie_id.as_str())? {
        return Err(Error::MovieUnavailable {
            movie_id: movie_id.to_string(),
        });
    }
    if !catalog::auditorium_exists(tables, auditorium_id.as_str())? {
        return Err(Error::UnknownAuditorium {
            auditorium_id: auditorium_id.to_string(),
        });
    }
    Ok((movie_id, auditorium_id, date, time))
}

/// Reject a slot already occupied by another showtime.
fn check_slot_free(
    showtimes: &[Showtime],
    auditorium_id: &AuditoriumId,
    date: NaiveDate,
    time: NaiveTime,
    exclude_id: Option<&str>,
) -> Result<()> {
    let occupied = showtimes
        .iter()
        .filter(|s| exclude_id != Some(s.id.as_str()))
        .any(|s| s.occupies(auditorium_id, date, time));
    if occupied {
        return Err(Error::ScheduleConflict {
            auditorium_id: auditorium_id.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
        });
    }
    Ok(())
}
