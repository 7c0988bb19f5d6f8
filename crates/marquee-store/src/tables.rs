//! Row codecs for the persisted tables.
//!
//! One [`Record`] implementation per entity type, fixing its table name,
//! header line, and field order. Decoding is structural only: wrong field
//! count or an unparseable typed field makes the row malformed, which the
//! tolerant loader then drops. String-content rules (blank names, embedded
//! separators) are enforced on operation input, not here.

use marquee_core::price::{format_cents, parse_cents};
use marquee_core::showtime::{DATE_FORMAT, TIME_FORMAT};
use marquee_core::{Auditorium, Booking, Movie, Showtime};

use chrono::{NaiveDate, NaiveTime};

use crate::Record;

impl Record for Movie {
    const TABLE: &'static str = "movies";
    const HEADER: &'static str = "movie_id,title,rating,duration,language,status";

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        let &[id, title, rating, duration, language, status] = fields else {
            return None;
        };
        Some(Self {
            id: id.parse().ok()?,
            title: title.to_owned(),
            rating: rating.to_owned(),
            duration_min: duration.parse().ok()?,
            language: language.to_owned(),
            status: status.parse().ok()?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.rating.clone(),
            self.duration_min.to_string(),
            self.language.clone(),
            self.status.to_string(),
        ]
    }
}

impl Record for Auditorium {
    const TABLE: &'static str = "auditoriums";
    const HEADER: &'static str = "aud_id,name";

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        let &[id, name] = fields else {
            return None;
        };
        Some(Self {
            id: id.parse().ok()?,
            name: name.to_owned(),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Record for Showtime {
    const TABLE: &'static str = "showtimes";
    const HEADER: &'static str = "show_id,movie_id,aud_id,date,time,remaining_seats,base_price";

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        let &[id, movie_id, aud_id, date, time, remaining, price] = fields else {
            return None;
        };
        Some(Self {
            id: id.parse().ok()?,
            movie_id: movie_id.parse().ok()?,
            auditorium_id: aud_id.parse().ok()?,
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?,
            time: NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?,
            remaining_seats: remaining.parse().ok()?,
            base_price_cents: parse_cents(price)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.movie_id.to_string(),
            self.auditorium_id.to_string(),
            self.date.format(DATE_FORMAT).to_string(),
            self.time.format(TIME_FORMAT).to_string(),
            self.remaining_seats.to_string(),
            format_cents(self.base_price_cents),
        ]
    }
}

impl Record for Booking {
    const TABLE: &'static str = "bookings";
    const HEADER: &'static str = "booking_id,customer_name,show_id,seat_count,status";

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        let &[id, customer_name, show_id, seat_count, status] = fields else {
            return None;
        };
        let seat_count: u32 = seat_count.parse().ok()?;
        if seat_count == 0 {
            return None;
        }
        Some(Self {
            id: id.parse().ok()?,
            customer_name: customer_name.to_owned(),
            showtime_id: show_id.parse().ok()?,
            seat_count,
            status: status.parse().ok()?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_name.clone(),
            self.showtime_id.to_string(),
            self.seat_count.to_string(),
            self.status.to_string(),
        ]
    }
}
