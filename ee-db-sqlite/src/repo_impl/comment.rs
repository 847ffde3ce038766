use super::*;

impl<'a> CommentRepo for DbReadOnly<'a> {
    fn create_comment(&self, _comment: &PostComment) -> Result<()> {
        unreachable!();
    }
    fn update_comment(&self, _comment: &PostComment) -> Result<()> {
        unreachable!();
    }
    fn mark_comment_deleted(&self, _id: &str) -> Result<usize> {
        unreachable!();
    }
    fn mark_comments_of_post_deleted(&self, _post_id: &str) -> Result<usize> {
        unreachable!();
    }

    fn get_comment(&self, id: &str) -> Result<PostComment> {
        get_comment(&mut self.conn.borrow_mut(), id)
    }
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<PostComment>> {
        load_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
}

impl<'a> CommentRepo for DbReadWrite<'a> {
    fn create_comment(&self, comment: &PostComment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn update_comment(&self, comment: &PostComment) -> Result<()> {
        update_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn mark_comment_deleted(&self, id: &str) -> Result<usize> {
        mark_comment_deleted(&mut self.conn.borrow_mut(), id)
    }
    fn mark_comments_of_post_deleted(&self, post_id: &str) -> Result<usize> {
        mark_comments_of_post_deleted(&mut self.conn.borrow_mut(), post_id)
    }

    fn get_comment(&self, id: &str) -> Result<PostComment> {
        get_comment(&mut self.conn.borrow_mut(), id)
    }
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<PostComment>> {
        load_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
}

impl<'a> CommentRepo for DbConnection<'a> {
    fn create_comment(&self, comment: &PostComment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn update_comment(&self, comment: &PostComment) -> Result<()> {
        update_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn mark_comment_deleted(&self, id: &str) -> Result<usize> {
        mark_comment_deleted(&mut self.conn.borrow_mut(), id)
    }
    fn mark_comments_of_post_deleted(&self, post_id: &str) -> Result<usize> {
        mark_comments_of_post_deleted(&mut self.conn.borrow_mut(), post_id)
    }

    fn get_comment(&self, id: &str) -> Result<PostComment> {
        get_comment(&mut self.conn.borrow_mut(), id)
    }
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<PostComment>> {
        load_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
}

fn into_new_comment(comment: &PostComment) -> models::NewPostComment {
    models::NewPostComment {
        id: comment.id.as_str(),
        post_id: comment.post_id.as_str(),
        author_id: comment.author_id.as_str(),
        body: &comment.body,
        status: PostStatusPrimitive::from(comment.status),
        created_at: comment.created_at.as_secs(),
    }
}

fn create_comment(conn: &mut SqliteConnection, comment: &PostComment) -> Result<()> {
    diesel::insert_into(schema::post_comments::table)
        .values(&into_new_comment(comment))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_comment(conn: &mut SqliteConnection, comment: &PostComment) -> Result<()> {
    use schema::post_comments::dsl;
    let count = diesel::update(dsl::post_comments.filter(dsl::id.eq(comment.id.as_str())))
        .set(&into_new_comment(comment))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_comment(conn: &mut SqliteConnection, id: &str) -> Result<PostComment> {
    use schema::post_comments::dsl;
    let entity = dsl::post_comments
        .filter(dsl::id.eq(id))
        .first::<models::PostCommentEntity>(conn)
        .map_err(from_diesel_err)?;
    comment_from_entity(entity)
}

fn load_comments_of_post(conn: &mut SqliteConnection, post_id: &str) -> Result<Vec<PostComment>> {
    use schema::post_comments::dsl;
    dsl::post_comments
        .filter(dsl::post_id.eq(post_id))
        .filter(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Active)))
        .order(dsl::created_at.asc())
        .load::<models::PostCommentEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(comment_from_entity)
        .collect()
}

fn mark_comment_deleted(conn: &mut SqliteConnection, id: &str) -> Result<usize> {
    use schema::post_comments::dsl;
    diesel::update(
        dsl::post_comments
            .filter(dsl::id.eq(id))
            .filter(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Active))),
    )
    .set(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Deleted)))
    .execute(conn)
    .map_err(from_diesel_err)
}

fn mark_comments_of_post_deleted(conn: &mut SqliteConnection, post_id: &str) -> Result<usize> {
    use schema::post_comments::dsl;
    diesel::update(
        dsl::post_comments
            .filter(dsl::post_id.eq(post_id))
            .filter(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Active))),
    )
    .set(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Deleted)))
    .execute(conn)
    .map_err(from_diesel_err)
}
