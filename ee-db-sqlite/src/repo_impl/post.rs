use std::collections::{HashMap, HashSet};

use super::*;

impl<'a> PostRepo for DbReadOnly<'a> {
    fn create_post(&self, _post: &Post) -> Result<()> {
        unreachable!();
    }
    fn update_post(&self, _post: &Post) -> Result<()> {
        unreachable!();
    }
    fn mark_post_deleted(&self, _id: &str) -> Result<usize> {
        unreachable!();
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        get_post(&mut self.conn.borrow_mut(), id)
    }
    fn list_posts(
        &self,
        section: Option<PostSection>,
        pagination: &Pagination,
        viewer: Option<&Id>,
    ) -> Result<Vec<PostSummary>> {
        list_posts(&mut self.conn.borrow_mut(), section, pagination, viewer)
    }
}

impl<'a> PostRepo for DbReadWrite<'a> {
    fn create_post(&self, post: &Post) -> Result<()> {
        create_post(&mut self.conn.borrow_mut(), post)
    }
    fn update_post(&self, post: &Post) -> Result<()> {
        update_post(&mut self.conn.borrow_mut(), post)
    }
    fn mark_post_deleted(&self, id: &str) -> Result<usize> {
        mark_post_deleted(&mut self.conn.borrow_mut(), id)
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        get_post(&mut self.conn.borrow_mut(), id)
    }
    fn list_posts(
        &self,
        section: Option<PostSection>,
        pagination: &Pagination,
        viewer: Option<&Id>,
    ) -> Result<Vec<PostSummary>> {
        list_posts(&mut self.conn.borrow_mut(), section, pagination, viewer)
    }
}

impl<'a> PostRepo for DbConnection<'a> {
    fn create_post(&self, post: &Post) -> Result<()> {
        create_post(&mut self.conn.borrow_mut(), post)
    }
    fn update_post(&self, post: &Post) -> Result<()> {
        update_post(&mut self.conn.borrow_mut(), post)
    }
    fn mark_post_deleted(&self, id: &str) -> Result<usize> {
        mark_post_deleted(&mut self.conn.borrow_mut(), id)
    }

    fn get_post(&self, id: &str) -> Result<Post> {
        get_post(&mut self.conn.borrow_mut(), id)
    }
    fn list_posts(
        &self,
        section: Option<PostSection>,
        pagination: &Pagination,
        viewer: Option<&Id>,
    ) -> Result<Vec<PostSummary>> {
        list_posts(&mut self.conn.borrow_mut(), section, pagination, viewer)
    }
}

fn into_new_post<'a>(post: &'a Post, section: &'a str) -> models::NewPost<'a> {
    models::NewPost {
        id: post.id.as_str(),
        author_id: post.author_id.as_str(),
        title: &post.title,
        body: &post.body,
        section,
        status: PostStatusPrimitive::from(post.status),
        created_at: post.created_at.as_secs(),
    }
}

fn create_post(conn: &mut SqliteConnection, post: &Post) -> Result<()> {
    let section = post.section.to_string();
    diesel::insert_into(schema::posts::table)
        .values(&into_new_post(post, &section))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_post(conn: &mut SqliteConnection, post: &Post) -> Result<()> {
    use schema::posts::dsl;
    let section = post.section.to_string();
    let count = diesel::update(dsl::posts.filter(dsl::id.eq(post.id.as_str())))
        .set(&into_new_post(post, &section))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_post(conn: &mut SqliteConnection, id: &str) -> Result<Post> {
    use schema::posts::dsl;
    let entity = dsl::posts
        .filter(dsl::id.eq(id))
        .first::<models::PostEntity>(conn)
        .map_err(from_diesel_err)?;
    post_from_entity(entity)
}

fn list_posts(
    conn: &mut SqliteConnection,
    section: Option<PostSection>,
    pagination: &Pagination,
    viewer: Option<&Id>,
) -> Result<Vec<PostSummary>> {
    use schema::posts::dsl;
    let mut query = dsl::posts
        .filter(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Active)))
        .order(dsl::created_at.desc())
        .into_boxed();
    if let Some(section) = section {
        query = query.filter(dsl::section.eq(section.to_string()));
    }
    if let Some(limit) = pagination.limit {
        query = query.limit(limit as i64);
    }
    if let Some(offset) = pagination.offset {
        query = query.offset(offset as i64);
    }
    let entities = query
        .load::<models::PostEntity>(conn)
        .map_err(from_diesel_err)?;
    let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();

    let like_counts = count_grouped_likes(conn, &ids)?;
    let comment_counts = count_grouped_comments(conn, &ids)?;
    let viewer_likes = match viewer {
        Some(viewer) => load_viewer_likes(conn, &ids, viewer)?,
        None => HashSet::new(),
    };

    entities
        .into_iter()
        .map(|entity| {
            let post = post_from_entity(entity)?;
            let id = post.id.to_string();
            Ok(PostSummary {
                like_count: like_counts.get(&id).copied().unwrap_or(0),
                comment_count: comment_counts.get(&id).copied().unwrap_or(0),
                liked_by_viewer: viewer_likes.contains(&id),
                post,
            })
        })
        .collect()
}

fn count_grouped_likes(
    conn: &mut SqliteConnection,
    post_ids: &[&str],
) -> Result<HashMap<String, u64>> {
    use schema::post_likes::dsl;
    let rows = dsl::post_likes
        .filter(dsl::post_id.eq_any(post_ids))
        .group_by(dsl::post_id)
        .select((dsl::post_id, diesel::dsl::count_star()))
        .load::<(String, i64)>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, count.max(0) as u64))
        .collect())
}

fn count_grouped_comments(
    conn: &mut SqliteConnection,
    post_ids: &[&str],
) -> Result<HashMap<String, u64>> {
    use schema::post_comments::dsl;
    let rows = dsl::post_comments
        .filter(dsl::post_id.eq_any(post_ids))
        .filter(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Active)))
        .group_by(dsl::post_id)
        .select((dsl::post_id, diesel::dsl::count_star()))
        .load::<(String, i64)>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, count.max(0) as u64))
        .collect())
}

fn load_viewer_likes(
    conn: &mut SqliteConnection,
    post_ids: &[&str],
    viewer: &Id,
) -> Result<HashSet<String>> {
    use schema::post_likes::dsl;
    Ok(dsl::post_likes
        .filter(dsl::post_id.eq_any(post_ids))
        .filter(dsl::user_id.eq(viewer.as_str()))
        .select(dsl::post_id)
        .load::<String>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .collect())
}

fn mark_post_deleted(conn: &mut SqliteConnection, id: &str) -> Result<usize> {
    use schema::posts::dsl;
    diesel::update(
        dsl::posts
            .filter(dsl::id.eq(id))
            .filter(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Active))),
    )
    .set(dsl::status.eq(PostStatusPrimitive::from(PostStatus::Deleted)))
    .execute(conn)
    .map_err(from_diesel_err)
}
