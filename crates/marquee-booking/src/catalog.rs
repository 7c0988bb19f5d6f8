//! Catalog operations: movies and auditoriums.
//!
//! Reference data for the inventory core. The only fields the core itself
//! reads are the movie's id/status and the auditorium's id; the rest is
//! carried for listings and receipts. Deletes are blocked while dependents
//! exist, mirroring the showtime/booking rule one level down.

use marquee_core::{fields, Auditorium, AuditoriumId, Error, Movie, MovieStatus, Result};
use marquee_store::{find_by_key, next_id};

use crate::cinema::{storage, Tables};

pub(crate) fn add_auditorium(tables: &Tables, id: &str, name: &str) -> Result<Auditorium> {
    let id: AuditoriumId = id.trim().parse()?;
    let name = fields::required("name", name)?;

    let auditoriums = tables.auditoriums.load().map_err(storage)?;
    if find_by_key(&auditoriums, id.as_str()).is_some() {
        return Err(Error::AlreadyExists {
            entity: "auditorium",
            id: id.to_string(),
        });
    }

    let auditorium = Auditorium { id, name };
    tables.auditoriums.append(&auditorium).map_err(storage)?;
    tracing::info!(auditorium = %auditorium.id, "auditorium added");
    Ok(auditorium)
}

pub(crate) fn list_auditoriums(tables: &Tables) -> Result<Vec<Auditorium>> {
    tables.auditoriums.load().map_err(storage)
}

pub(crate) fn auditorium_exists(tables: &Tables, id: &str) -> Result<bool> {
    let auditoriums = tables.auditoriums.load().map_err(storage)?;
    Ok(find_by_key(&auditoriums, id.trim()).is_some())
}

pub(crate) fn add_movie(
    tables: &Tables,
    title: &str,
    rating: &str,
    duration_min: u32,
    language: &str,
    status: MovieStatus,
) -> Result<Movie> {
    let (title, rating, language) = movie_fields(title, rating, duration_min, language)?;

    let movies = tables.movies.load().map_err(storage)?;
    let movie = Movie {
        id: next_id(&movies).parse()?,
        title,
        rating,
        duration_min,
        language,
        status,
    };
    tables.movies.append(&movie).map_err(storage)?;
    tracing::info!(movie = %movie.id, title = %movie.title, "movie added");
    Ok(movie)
}

pub(crate) fn update_movie(
    tables: &Tables,
    id: &str,
    title: &str,
    rating: &str,
    duration_min: u32,
    language: &str,
    status: MovieStatus,
) -> Result<Movie> {
    let id = id.trim();
    let (title, rating, language) = movie_fields(title, rating, duration_min, language)?;

    let mut movies = tables.movies.load().map_err(storage)?;
    let slot = movies
        .iter_mut()
        .find(|m| m.id.as_str() == id)
        .ok_or_else(|| Error::NotFound {
            entity: "movie",
            id: id.to_owned(),
        })?;
    slot.title = title;
    slot.rating = rating;
    slot.duration_min = duration_min;
    slot.language = language;
    slot.status = status;
    let updated = slot.clone();
    tables.movies.replace_all(&movies).map_err(storage)?;
    tracing::info!(movie = %updated.id, "movie updated");
    Ok(updated)
}

pub(crate) fn delete_movie(tables: &Tables, id: &str) -> Result<()> {
    let id = id.trim();

    let showtimes = tables.showtimes.load().map_err(storage)?;
    if showtimes.iter().any(|s| s.movie_id.as_str() == id) {
        return Err(Error::HasDependents {
            entity: "movie",
            id: id.to_owned(),
        });
    }

    let mut movies = tables.movies.load().map_err(storage)?;
    let before = movies.len();
    movies.retain(|m| m.id.as_str() != id);
    if movies.len() == before {
        return Err(Error::NotFound {
            entity: "movie",
            id: id.to_owned(),
        });
    }
    tables.movies.replace_all(&movies).map_err(storage)?;
    tracing::info!(movie = %id, "movie removed");
    Ok(())
}

pub(crate) fn list_movies(tables: &Tables) -> Result<Vec<Movie>> {
    tables.movies.load().map_err(storage)
}

pub(crate) fn find_movie(tables: &Tables, id: &str) -> Result<Option<Movie>> {
    let movies = tables.movies.load().map_err(storage)?;
    Ok(find_by_key(&movies, id.trim()).cloned())
}

pub(crate) fn is_movie_active(tables: &Tables, id: &str) -> Result<bool> {
    Ok(find_movie(tables, id)?.is_some_and(|m| m.is_active()))
}

/// Validate the free-form movie fields shared by add and update.
fn movie_fields(
    title: &str,
    rating: &str,
    duration_min: u32,
    language: &str,
) -> Result<(String, String, String)> {
    let title = fields::required("title", title)?;
    let rating = fields::optional("rating", rating)?;
    let language = fields::optional("language", language)?;
    if duration_min == 0 {
        return Err(Error::InvalidInput {
            field: "duration",
            reason: "must be a positive number of minutes".into(),
        });
    }
    Ok((title, rating, language))
}
