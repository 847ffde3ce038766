use super::*;

/// Deletes a forum post with its cascade: likes are removed for
/// good, comments and the post itself are soft-deleted. All three
/// effects are committed atomically or not at all.
pub fn delete_post(connections: &sqlite::Connections, user: &User, post_id: &str) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| {
        let post = usecases::authorize_post_deletion(conn, user, post_id)?;
        let like_count = conn.delete_likes_of_post(post.id.as_str())?;
        let comment_count = conn.mark_comments_of_post_deleted(post.id.as_str())?;
        let post_count = conn.mark_post_deleted(post.id.as_str())?;
        debug_assert_eq!(1, post_count);
        info!(
            "Deleted post {} ({} like(s) removed, {} comment(s) hidden)",
            post.id, like_count, comment_count
        );
        Ok::<_, usecases::Error>(())
    })?;
    Ok(())
}
