// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use std::io;

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &Id) -> Result<User>;
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>>;

    fn count_users(&self) -> Result<usize>;
}

#[derive(Debug, Default, Clone)]
pub struct PlaceFilter {
    pub city: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub diets: DietaryFlags,
}

pub trait PlaceRepo {
    fn create_place(&self, place: &Place, status: ModerationStatus) -> Result<()>;
    fn update_place(&self, place: &Place) -> Result<()>;

    fn get_place(&self, id: &str) -> Result<(Place, ModerationStatus)>;

    /// Places with the given status matching the filter,
    /// ordered by name.
    fn query_places(
        &self,
        filter: &PlaceFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Place>>;

    /// Flips the status of all listed places that are still pending
    /// and records the decision. Returns the number of affected rows.
    fn moderate_places(
        &self,
        ids: &[&str],
        status: ModerationStatus,
        log: &ModerationLog,
    ) -> Result<usize>;

    fn count_places(&self) -> Result<usize>;
}

#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub city: Option<String>,
    pub category: Option<String>,
    pub start_min: Option<Timestamp>,
    pub start_max: Option<Timestamp>,
}

pub trait EventRepo {
    fn create_event(&self, event: &Event, status: ModerationStatus) -> Result<()>;

    fn get_event(&self, id: &str) -> Result<(Event, ModerationStatus)>;

    /// Events with the given status matching the filter,
    /// ordered chronologically.
    fn query_events(
        &self,
        filter: &EventFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Event>>;

    /// See [`PlaceRepo::moderate_places`].
    fn moderate_events(
        &self,
        ids: &[&str],
        status: ModerationStatus,
        log: &ModerationLog,
    ) -> Result<usize>;
}

pub trait RatingRepo {
    fn create_rating(&self, rating: &Rating) -> Result<()>;
    fn load_ratings_of_place(&self, place_id: &str) -> Result<Vec<Rating>>;
}

/// A forum post annotated with its aggregate counts and the
/// requesting user's like state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub like_count: u64,
    pub comment_count: u64,
    pub liked_by_viewer: bool,
}

pub trait PostRepo {
    fn create_post(&self, post: &Post) -> Result<()>;
    fn update_post(&self, post: &Post) -> Result<()>;

    /// Loads the post regardless of its status.
    fn get_post(&self, id: &str) -> Result<Post>;

    /// Active posts, newest first.
    fn list_posts(
        &self,
        section: Option<PostSection>,
        pagination: &Pagination,
        viewer: Option<&Id>,
    ) -> Result<Vec<PostSummary>>;

    /// Soft delete. Returns the number of affected rows.
    fn mark_post_deleted(&self, id: &str) -> Result<usize>;
}

pub trait CommentRepo {
    fn create_comment(&self, comment: &PostComment) -> Result<()>;
    fn update_comment(&self, comment: &PostComment) -> Result<()>;

    /// Loads the comment regardless of its status.
    fn get_comment(&self, id: &str) -> Result<PostComment>;

    /// Active comments of a post, oldest first.
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<PostComment>>;

    fn mark_comment_deleted(&self, id: &str) -> Result<usize>;
    fn mark_comments_of_post_deleted(&self, post_id: &str) -> Result<usize>;
}

pub trait LikeRepo {
    /// Fails with [`Error::AlreadyExists`] if the pair is already present.
    fn create_like(&self, like: &PostLike) -> Result<()>;
    fn delete_like(&self, user_id: &Id, post_id: &str) -> Result<usize>;
    fn delete_likes_of_post(&self, post_id: &str) -> Result<usize>;

    fn count_likes_of_post(&self, post_id: &str) -> Result<u64>;
    fn user_likes_post(&self, user_id: &Id, post_id: &str) -> Result<bool>;
}

pub trait SavedStoreRepo {
    /// Fails with [`Error::AlreadyExists`] if the pair is already present.
    fn create_saved_store(&self, saved: &SavedStore) -> Result<()>;
    fn delete_saved_store(&self, user_id: &Id, place_id: &str) -> Result<usize>;

    /// Bookmarks of a user joined with their places, newest first.
    fn saved_stores_of_user(&self, user_id: &Id) -> Result<Vec<(SavedStore, Place)>>;
}

pub trait UserTokenRepo {
    fn replace_user_token(&self, token: UserToken) -> Result<EmailNonce>;
    fn consume_user_token(&self, email_nonce: &EmailNonce) -> Result<UserToken>;
    fn delete_expired_user_tokens(&self, expired_before: Timestamp) -> Result<usize>;
}
