use super::*;

#[get("/user/saved-stores")]
pub fn get_saved_stores(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    _api_limit: GeneralRateLimit,
) -> Result<Vec<json::SavedStore>> {
    let saved = usecases::saved_stores(&db.shared()?, &user.0)?;
    Ok(Json(saved.into_iter().map(Into::into).collect()))
}

#[post("/user/saved-stores", format = "application/json", data = "<new_saved>")]
pub fn post_saved_store(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    new_saved: JsonResult<json::NewSavedStore>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    let json::NewSavedStore { place_id } = new_saved?.into_inner();
    usecases::save_store(&db.exclusive()?, &user.0, &place_id, Timestamp::now())?;
    Ok(Json(()))
}

#[delete("/user/saved-stores/<place_id>")]
pub fn delete_saved_store(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    place_id: String,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    usecases::delete_saved_store(&db.exclusive()?, &user.0, &place_id)?;
    Ok(Json(()))
}
