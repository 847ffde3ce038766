use super::*;

impl<'a> RatingRepo for DbReadOnly<'a> {
    fn create_rating(&self, _rating: &Rating) -> Result<()> {
        unreachable!();
    }

    fn load_ratings_of_place(&self, place_id: &str) -> Result<Vec<Rating>> {
        load_ratings_of_place(&mut self.conn.borrow_mut(), place_id)
    }
}

impl<'a> RatingRepo for DbReadWrite<'a> {
    fn create_rating(&self, rating: &Rating) -> Result<()> {
        create_rating(&mut self.conn.borrow_mut(), rating)
    }

    fn load_ratings_of_place(&self, place_id: &str) -> Result<Vec<Rating>> {
        load_ratings_of_place(&mut self.conn.borrow_mut(), place_id)
    }
}

impl<'a> RatingRepo for DbConnection<'a> {
    fn create_rating(&self, rating: &Rating) -> Result<()> {
        create_rating(&mut self.conn.borrow_mut(), rating)
    }

    fn load_ratings_of_place(&self, place_id: &str) -> Result<Vec<Rating>> {
        load_ratings_of_place(&mut self.conn.borrow_mut(), place_id)
    }
}

fn create_rating(conn: &mut SqliteConnection, rating: &Rating) -> Result<()> {
    let new_rating = models::NewRating {
        id: rating.id.as_str(),
        place_id: rating.place_id.as_str(),
        user_id: rating.user_id.as_str(),
        created_at: rating.created_at.as_secs(),
        value: u8::from(rating.value) as i16,
        comment: rating.comment.as_deref(),
    };
    diesel::insert_into(schema::ratings::table)
        .values(&new_rating)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn load_ratings_of_place(conn: &mut SqliteConnection, place_id: &str) -> Result<Vec<Rating>> {
    use schema::ratings::dsl;
    Ok(dsl::ratings
        .filter(dsl::place_id.eq(place_id))
        .order(dsl::created_at.asc())
        .load::<models::RatingEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(rating_from_entity)
        .collect())
}
