use super::*;

/// Stores a new place rating and the recomputed average inside one
/// transaction.
pub fn rate_place(
    connections: &sqlite::Connections,
    user: &User,
    new_rating: usecases::NewPlaceRating,
    now: Timestamp,
) -> Result<Rating> {
    let mut connection = connections.exclusive()?;
    let rating = connection.transaction(|conn| {
        usecases::rate_place(conn, user, new_rating, now)
    })?;
    Ok(rating)
}
