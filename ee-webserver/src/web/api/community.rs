use super::*;

fn post_summary(summary: ee_core::repositories::PostSummary) -> json::PostSummary {
    let ee_core::repositories::PostSummary {
        post,
        like_count,
        comment_count,
        liked_by_viewer,
    } = summary;
    json::PostSummary {
        post: post.into(),
        like_count,
        comment_count,
        liked_by_me: liked_by_viewer,
    }
}

#[get("/community/posts?<section>&<offset>&<limit>")]
pub fn get_posts(
    db: sqlite::Connections,
    account: Option<Account>,
    section: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
    _api_limit: GeneralRateLimit,
) -> Result<Vec<json::PostSummary>> {
    let pagination = Pagination { offset, limit };
    let viewer = account.map(|account| account.user_id());
    let posts = usecases::list_posts(
        &db.shared()?,
        section.as_deref(),
        &pagination,
        viewer.as_ref(),
    )?;
    Ok(Json(posts.into_iter().map(post_summary).collect()))
}

#[get("/community/posts/<id>")]
pub fn get_post(
    db: sqlite::Connections,
    id: String,
    _api_limit: GeneralRateLimit,
) -> Result<json::PostWithComments> {
    let (post, comments) = usecases::get_post_with_comments(&db.shared()?, &id)?;
    Ok(Json(json::PostWithComments {
        post: post.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

#[post("/community/posts", format = "application/json", data = "<new_post>")]
pub fn post_post(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    new_post: JsonResult<json::NewPost>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Post> {
    let json::NewPost {
        title,
        body,
        section,
    } = new_post?.into_inner();
    let new_post = usecases::NewPost {
        title,
        body,
        section,
    };
    let post = usecases::create_post(&db.exclusive()?, &user.0, new_post, Timestamp::now())?;
    Ok(Json(post.into()))
}

#[put("/community/posts/<id>", format = "application/json", data = "<changes>")]
pub fn put_post(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    changes: JsonResult<json::PostChanges>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Post> {
    let json::PostChanges {
        title,
        body,
        section,
    } = changes?.into_inner();
    let changes = usecases::PostChanges {
        title,
        body,
        section,
    };
    let post = usecases::update_post(&db.exclusive()?, &user.0, &id, changes)?;
    Ok(Json(post.into()))
}

#[delete("/community/posts/<id>")]
pub fn delete_post(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    flows::delete_post(&db, &user.0, &id)?;
    Ok(Json(()))
}

#[post("/community/posts/<id>/like")]
pub fn post_like(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::LikeState> {
    let (liked, like_count) =
        usecases::toggle_like(&db.exclusive()?, &user.0, &id, Timestamp::now())?;
    Ok(Json(json::LikeState { liked, like_count }))
}

#[post(
    "/community/posts/<id>/comments",
    format = "application/json",
    data = "<new_comment>"
)]
pub fn post_comment(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    new_comment: JsonResult<json::NewComment>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Comment> {
    let json::NewComment { body } = new_comment?.into_inner();
    let comment =
        usecases::create_comment(&db.exclusive()?, &user.0, &id, body, Timestamp::now())?;
    Ok(Json(comment.into()))
}

#[put(
    "/community/comments/<id>",
    format = "application/json",
    data = "<changes>"
)]
pub fn put_comment(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    changes: JsonResult<json::NewComment>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Comment> {
    let json::NewComment { body } = changes?.into_inner();
    let comment = usecases::update_comment(&db.exclusive()?, &user.0, &id, body)?;
    Ok(Json(comment.into()))
}

#[delete("/community/comments/<id>")]
pub fn delete_comment(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    usecases::delete_comment(&db.exclusive()?, &user.0, &id)?;
    Ok(Json(()))
}
