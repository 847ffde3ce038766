use super::{authorize_owner_or_admin, prelude::*};
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub section: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub section: Option<String>,
}

fn parse_section(section: &str) -> Result<PostSection> {
    section.parse::<PostSection>().map_err(|_| Error::Section)
}

fn active_post<R: PostRepo>(repo: &R, id: &str) -> Result<Post> {
    let post = repo.get_post(id)?;
    if post.status != PostStatus::Active {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    Ok(post)
}

fn active_comment<R: CommentRepo>(repo: &R, id: &str) -> Result<PostComment> {
    let comment = repo.get_comment(id)?;
    if comment.status != PostStatus::Active {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    Ok(comment)
}

pub fn create_post<R: PostRepo>(repo: &R, author: &User, new_post: NewPost, now: Timestamp) -> Result<Post> {
    let NewPost {
        title,
        body,
        section,
    } = new_post;
    let section = parse_section(&section)?;
    if !validate::is_valid_title(&title) {
        return Err(Error::Title);
    }
    if !validate::is_valid_text(&body) {
        return Err(Error::Text);
    }
    let post = Post {
        id: Id::new(),
        author_id: author.id.clone(),
        title: title.trim().to_string(),
        body,
        section,
        status: PostStatus::Active,
        created_at: now,
    };
    repo.create_post(&post)?;
    Ok(post)
}

/// Active posts, newest first, annotated with their like/comment
/// counts and the viewer's like state.
pub fn list_posts<R: PostRepo>(
    repo: &R,
    section: Option<&str>,
    pagination: &Pagination,
    viewer: Option<&Id>,
) -> Result<Vec<PostSummary>> {
    let section = section.map(parse_section).transpose()?;
    Ok(repo.list_posts(section, pagination, viewer)?)
}

/// A post with its full comment thread, oldest comment first.
pub fn get_post_with_comments<R>(repo: &R, id: &str) -> Result<(Post, Vec<PostComment>)>
where
    R: PostRepo + CommentRepo,
{
    let post = active_post(repo, id)?;
    let comments = repo.load_comments_of_post(id)?;
    Ok((post, comments))
}

/// Applies changes to a post. Only the author or an admin may edit.
pub fn update_post<R: PostRepo>(
    repo: &R,
    user: &User,
    id: &str,
    changes: PostChanges,
) -> Result<Post> {
    let mut post = active_post(repo, id)?;
    authorize_owner_or_admin(user, &post.author_id)?;
    if let Some(title) = changes.title {
        if !validate::is_valid_title(&title) {
            return Err(Error::Title);
        }
        post.title = title.trim().to_string();
    }
    if let Some(body) = changes.body {
        if !validate::is_valid_text(&body) {
            return Err(Error::Text);
        }
        post.body = body;
    }
    if let Some(section) = changes.section {
        post.section = parse_section(&section)?;
    }
    repo.update_post(&post)?;
    Ok(post)
}

/// Checks that the user may delete the post and returns it.
/// The actual cascade runs in a transaction one layer up.
pub fn authorize_post_deletion<R: PostRepo>(repo: &R, user: &User, id: &str) -> Result<Post> {
    let post = active_post(repo, id)?;
    authorize_owner_or_admin(user, &post.author_id)?;
    Ok(post)
}

pub fn create_comment<R>(
    repo: &R,
    author: &User,
    post_id: &str,
    body: String,
    now: Timestamp,
) -> Result<PostComment>
where
    R: PostRepo + CommentRepo,
{
    let post = active_post(repo, post_id)?;
    if !validate::is_valid_text(&body) {
        return Err(Error::Text);
    }
    let comment = PostComment {
        id: Id::new(),
        post_id: post.id,
        author_id: author.id.clone(),
        body,
        status: PostStatus::Active,
        created_at: now,
    };
    repo.create_comment(&comment)?;
    Ok(comment)
}

pub fn update_comment<R: CommentRepo>(
    repo: &R,
    user: &User,
    id: &str,
    body: String,
) -> Result<PostComment> {
    let mut comment = active_comment(repo, id)?;
    authorize_owner_or_admin(user, &comment.author_id)?;
    if !validate::is_valid_text(&body) {
        return Err(Error::Text);
    }
    comment.body = body;
    repo.update_comment(&comment)?;
    Ok(comment)
}

/// Soft-deletes a single comment.
pub fn delete_comment<R: CommentRepo>(repo: &R, user: &User, id: &str) -> Result<()> {
    let comment = active_comment(repo, id)?;
    authorize_owner_or_admin(user, &comment.author_id)?;
    let count = repo.mark_comment_deleted(id)?;
    debug_assert_eq!(1, count);
    Ok(())
}

/// Inserts or removes the (user, post) like pair and returns the
/// new state together with the updated count.
pub fn toggle_like<R>(repo: &R, user: &User, post_id: &str, now: Timestamp) -> Result<(bool, u64)>
where
    R: PostRepo + LikeRepo,
{
    let post = active_post(repo, post_id)?;
    let liked = if repo.user_likes_post(&user.id, post.id.as_str())? {
        repo.delete_like(&user.id, post.id.as_str())?;
        false
    } else {
        repo.create_like(&PostLike {
            user_id: user.id.clone(),
            post_id: post.id.clone(),
            created_at: now,
        })?;
        true
    };
    let like_count = repo.count_likes_of_post(post.id.as_str())?;
    Ok((liked, like_count))
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{register_user, MockDb},
        *,
    };

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.into(),
            body: "Some content".into(),
            section: "general".into(),
        }
    }

    #[test]
    fn create_and_list_posts() {
        let db = MockDb::default();
        let author = register_user(&db, "maria", Role::User);
        let now = Timestamp::from_secs(10);
        create_post(&db, &author, new_post("First"), now).unwrap();
        create_post(
            &db,
            &author,
            NewPost {
                section: "recipes".into(),
                ..new_post("Second")
            },
            now + time::Duration::seconds(1),
        )
        .unwrap();

        let all = list_posts(&db, None, &Pagination::default(), None).unwrap();
        assert_eq!(2, all.len());
        // Newest first
        assert_eq!("Second", all[0].post.title);

        let recipes = list_posts(&db, Some("recipes"), &Pagination::default(), None).unwrap();
        assert_eq!(1, recipes.len());
        assert!(matches!(
            list_posts(&db, Some("bogus"), &Pagination::default(), None),
            Err(Error::Section)
        ));
    }

    #[test]
    fn only_the_author_or_an_admin_may_edit() {
        let db = MockDb::default();
        let author = register_user(&db, "maria", Role::User);
        let other = register_user(&db, "joao", Role::User);
        let admin = register_user(&db, "root", Role::Admin);
        let now = Timestamp::from_secs(10);
        let post = create_post(&db, &author, new_post("First"), now).unwrap();

        assert!(matches!(
            update_post(
                &db,
                &other,
                post.id.as_str(),
                PostChanges {
                    title: Some("Hijacked".into()),
                    ..Default::default()
                },
            ),
            Err(Error::Forbidden)
        ));
        let updated = update_post(
            &db,
            &admin,
            post.id.as_str(),
            PostChanges {
                title: Some("Moderated".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!("Moderated", updated.title);
    }

    #[test]
    fn comment_thread_is_ordered_oldest_first() {
        let db = MockDb::default();
        let author = register_user(&db, "maria", Role::User);
        let now = Timestamp::from_secs(10);
        let post = create_post(&db, &author, new_post("First"), now).unwrap();
        create_comment(&db, &author, post.id.as_str(), "first reply".into(), now).unwrap();
        create_comment(
            &db,
            &author,
            post.id.as_str(),
            "second reply".into(),
            now + time::Duration::seconds(5),
        )
        .unwrap();
        let (_, comments) = get_post_with_comments(&db, post.id.as_str()).unwrap();
        assert_eq!(2, comments.len());
        assert_eq!("first reply", comments[0].body);
    }

    #[test]
    fn toggle_like_twice() {
        let db = MockDb::default();
        let author = register_user(&db, "maria", Role::User);
        let liker = register_user(&db, "joao", Role::User);
        let now = Timestamp::from_secs(10);
        let post = create_post(&db, &author, new_post("First"), now).unwrap();

        assert_eq!(
            (true, 1),
            toggle_like(&db, &liker, post.id.as_str(), now).unwrap()
        );
        assert_eq!(
            (false, 0),
            toggle_like(&db, &liker, post.id.as_str(), now).unwrap()
        );
    }

    #[test]
    fn deleted_posts_are_hidden() {
        let db = MockDb::default();
        let author = register_user(&db, "maria", Role::User);
        let now = Timestamp::from_secs(10);
        let post = create_post(&db, &author, new_post("First"), now).unwrap();
        db.mark_post_deleted(post.id.as_str()).unwrap();
        assert!(get_post_with_comments(&db, post.id.as_str()).is_err());
        assert!(list_posts(&db, None, &Pagination::default(), None)
            .unwrap()
            .is_empty());
    }
}
