use super::*;

#[get("/csrf-token")]
pub fn get_csrf_token(
    cookies: &rocket::http::CookieJar<'_>,
    csrf_state: &State<csrf::CsrfState>,
    _api_limit: GeneralRateLimit,
) -> Result<json::CsrfToken> {
    let secret = csrf::session_secret(cookies);
    let token = csrf_state.generate_token(&secret)?;
    Ok(Json(json::CsrfToken { token }))
}

#[get("/version")]
pub fn get_version(version: &State<Version>, _api_limit: GeneralRateLimit) -> Json<json::Version> {
    Json(json::Version {
        version: version.0.to_string(),
    })
}
