// All timestamps with the `_at` postfix are stored as unix
// timestamps in seconds.

use super::schema::*;

// `treat_none_as_null` because updates must be able to clear
// nullable columns, e.g. the lockout timestamp after a successful
// login.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: i16,
    pub failed_login_attempts: i16,
    pub locked_until: Option<i64>,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: i16,
    pub failed_login_attempts: i16,
    pub locked_until: Option<i64>,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = places, treat_none_as_null = true)]
pub struct NewPlace<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub street: Option<&'a str>,
    pub city: &'a str,
    pub region: Option<&'a str>,
    pub country: &'a str,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: &'a str,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub organic: bool,
    pub avg_rating: Option<i16>,
    pub created_at: i64,
    pub created_by: Option<&'a str>,
}

#[derive(Queryable)]
pub struct PlaceEntity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub street: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub country: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: String,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub organic: bool,
    pub status: i16,
    pub avg_rating: Option<i16>,
    pub created_at: i64,
    pub created_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = place_tags)]
pub struct NewPlaceTag<'a> {
    pub place_id: &'a str,
    pub tag: &'a str,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = events, treat_none_as_null = true)]
pub struct NewEvent<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub city: &'a str,
    pub category: &'a str,
    pub start_at: i64,
    pub created_at: i64,
    pub created_by: Option<&'a str>,
}

#[derive(Queryable)]
pub struct EventEntity {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    pub category: String,
    pub start_at: i64,
    pub status: i16,
    pub created_at: i64,
    pub created_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = ratings)]
pub struct NewRating<'a> {
    pub id: &'a str,
    pub place_id: &'a str,
    pub user_id: &'a str,
    pub created_at: i64,
    pub value: i16,
    pub comment: Option<&'a str>,
}

#[derive(Queryable)]
pub struct RatingEntity {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub created_at: i64,
    pub value: i16,
    pub comment: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = posts)]
pub struct NewPost<'a> {
    pub id: &'a str,
    pub author_id: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub section: &'a str,
    pub status: i16,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct PostEntity {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub section: String,
    pub status: i16,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = post_comments)]
pub struct NewPostComment<'a> {
    pub id: &'a str,
    pub post_id: &'a str,
    pub author_id: &'a str,
    pub body: &'a str,
    pub status: i16,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct PostCommentEntity {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub body: String,
    pub status: i16,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = post_likes)]
pub struct NewPostLike<'a> {
    pub user_id: &'a str,
    pub post_id: &'a str,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = saved_stores)]
pub struct NewSavedStore<'a> {
    pub user_id: &'a str,
    pub place_id: &'a str,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct SavedStoreEntity {
    pub user_id: String,
    pub place_id: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = user_tokens)]
pub struct NewUserToken<'a> {
    pub email: &'a str,
    pub nonce: &'a str,
    pub expires_at: i64,
}

#[derive(Queryable)]
pub struct UserTokenEntity {
    pub email: String,
    pub nonce: String,
    pub expires_at: i64,
}
