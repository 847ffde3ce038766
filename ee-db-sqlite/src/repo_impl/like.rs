use super::*;

impl<'a> LikeRepo for DbReadOnly<'a> {
    fn create_like(&self, _like: &PostLike) -> Result<()> {
        unreachable!();
    }
    fn delete_like(&self, _user_id: &Id, _post_id: &str) -> Result<usize> {
        unreachable!();
    }
    fn delete_likes_of_post(&self, _post_id: &str) -> Result<usize> {
        unreachable!();
    }

    fn count_likes_of_post(&self, post_id: &str) -> Result<u64> {
        count_likes_of_post(&mut self.conn.borrow_mut(), post_id)
    }
    fn user_likes_post(&self, user_id: &Id, post_id: &str) -> Result<bool> {
        user_likes_post(&mut self.conn.borrow_mut(), user_id, post_id)
    }
}

impl<'a> LikeRepo for DbReadWrite<'a> {
    fn create_like(&self, like: &PostLike) -> Result<()> {
        create_like(&mut self.conn.borrow_mut(), like)
    }
    fn delete_like(&self, user_id: &Id, post_id: &str) -> Result<usize> {
        delete_like(&mut self.conn.borrow_mut(), user_id, post_id)
    }
    fn delete_likes_of_post(&self, post_id: &str) -> Result<usize> {
        delete_likes_of_post(&mut self.conn.borrow_mut(), post_id)
    }

    fn count_likes_of_post(&self, post_id: &str) -> Result<u64> {
        count_likes_of_post(&mut self.conn.borrow_mut(), post_id)
    }
    fn user_likes_post(&self, user_id: &Id, post_id: &str) -> Result<bool> {
        user_likes_post(&mut self.conn.borrow_mut(), user_id, post_id)
    }
}

impl<'a> LikeRepo for DbConnection<'a> {
    fn create_like(&self, like: &PostLike) -> Result<()> {
        create_like(&mut self.conn.borrow_mut(), like)
    }
    fn delete_like(&self, user_id: &Id, post_id: &str) -> Result<usize> {
        delete_like(&mut self.conn.borrow_mut(), user_id, post_id)
    }
    fn delete_likes_of_post(&self, post_id: &str) -> Result<usize> {
        delete_likes_of_post(&mut self.conn.borrow_mut(), post_id)
    }

    fn count_likes_of_post(&self, post_id: &str) -> Result<u64> {
        count_likes_of_post(&mut self.conn.borrow_mut(), post_id)
    }
    fn user_likes_post(&self, user_id: &Id, post_id: &str) -> Result<bool> {
        user_likes_post(&mut self.conn.borrow_mut(), user_id, post_id)
    }
}

fn create_like(conn: &mut SqliteConnection, like: &PostLike) -> Result<()> {
    let new_like = models::NewPostLike {
        user_id: like.user_id.as_str(),
        post_id: like.post_id.as_str(),
        created_at: like.created_at.as_secs(),
    };
    diesel::insert_into(schema::post_likes::table)
        .values(&new_like)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_like(conn: &mut SqliteConnection, user_id: &Id, post_id: &str) -> Result<usize> {
    use schema::post_likes::dsl;
    diesel::delete(
        dsl::post_likes
            .filter(dsl::user_id.eq(user_id.as_str()))
            .filter(dsl::post_id.eq(post_id)),
    )
    .execute(conn)
    .map_err(from_diesel_err)
}

fn delete_likes_of_post(conn: &mut SqliteConnection, post_id: &str) -> Result<usize> {
    use schema::post_likes::dsl;
    diesel::delete(dsl::post_likes.filter(dsl::post_id.eq(post_id)))
        .execute(conn)
        .map_err(from_diesel_err)
}

fn count_likes_of_post(conn: &mut SqliteConnection, post_id: &str) -> Result<u64> {
    use schema::post_likes::dsl;
    Ok(dsl::post_likes
        .filter(dsl::post_id.eq(post_id))
        .select(diesel::dsl::count_star())
        .first::<i64>(conn)
        .map_err(from_diesel_err)?
        .max(0) as u64)
}

fn user_likes_post(conn: &mut SqliteConnection, user_id: &Id, post_id: &str) -> Result<bool> {
    use schema::post_likes::dsl;
    let count = dsl::post_likes
        .filter(dsl::user_id.eq(user_id.as_str()))
        .filter(dsl::post_id.eq(post_id))
        .select(diesel::dsl::count_star())
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count > 0)
}
