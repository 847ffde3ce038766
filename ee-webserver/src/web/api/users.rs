use rocket::http::CookieJar;

use super::*;
use crate::web::Notify;

#[post("/auth/register", format = "application/json", data = "<register>")]
pub fn post_register(
    db: sqlite::Connections,
    notify: &State<Notify>,
    register: JsonResult<json::Register>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
    _auth_limit: AuthRateLimit,
) -> Result<json::User> {
    let json::Register {
        username,
        email,
        password,
    } = register?.into_inner();
    let new_user = usecases::NewUser {
        username,
        email: email.parse()?,
        password,
    };
    let user = usecases::register(&db.exclusive()?, new_user, Timestamp::now())?;
    notify.user_registered(&user);
    Ok(Json(user.into()))
}

#[post("/auth/login", format = "application/json", data = "<credentials>")]
pub fn post_login(
    db: sqlite::Connections,
    cookies: &CookieJar<'_>,
    cfg: &State<Cfg>,
    credentials: JsonResult<json::Credentials>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
    _auth_limit: AuthRateLimit,
    _login_limit: LoginRateLimit,
) -> Result<json::User> {
    let json::Credentials {
        username_or_email,
        password,
        remember_me,
    } = credentials?.into_inner();
    let user = usecases::login(
        &db.exclusive()?,
        &usecases::Credentials {
            username_or_email: &username_or_email,
            password: &password,
        },
        Timestamp::now(),
    )
    .map_err(|err| {
        log::debug!("Login of '{username_or_email}' failed: {err}");
        err
    })?;
    Account::new(user.id.clone(), remember_me).store(cookies, cfg);
    Ok(Json(user.into()))
}

#[post("/auth/logout")]
pub fn post_logout(
    _account: Account,
    cookies: &CookieJar<'_>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
    _auth_limit: AuthRateLimit,
) -> Json<()> {
    Account::remove(cookies);
    Json(())
}

#[get("/users/current")]
pub fn get_current_user(
    db: sqlite::Connections,
    account: Account,
    _api_limit: GeneralRateLimit,
) -> Result<json::User> {
    let user = account.user(&db.shared()?)?;
    Ok(Json(user.into()))
}

#[post(
    "/auth/reset-password-request",
    format = "application/json",
    data = "<data>"
)]
pub fn post_request_password_reset(
    db: sqlite::Connections,
    notify: &State<Notify>,
    data: JsonResult<json::RequestPasswordReset>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
    _auth_limit: AuthRateLimit,
) -> Result<()> {
    let request = data?.into_inner();
    let email = request.email.parse()?;
    flows::reset_password_request(&db, &*notify.0, &email, Timestamp::now())?;
    Ok(Json(()))
}

#[post("/auth/reset-password", format = "application/json", data = "<data>")]
pub fn post_reset_password(
    db: sqlite::Connections,
    data: JsonResult<json::ResetPassword>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
    _auth_limit: AuthRateLimit,
) -> Result<()> {
    let request = data?.into_inner();
    let email_nonce = ee_entities::nonce::EmailNonce::decode_from_str(&request.token)?;
    let new_password = request.new_password.parse()?;
    flows::reset_password_with_email_nonce(&db, email_nonce, new_password, Timestamp::now())?;
    Ok(Json(()))
}
