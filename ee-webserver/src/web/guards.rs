use rocket::{
    http::{Cookie, CookieJar, SameSite, Status},
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};
use serde::{Deserialize, Serialize};
use time::Duration;

use ee_core::{repositories::UserRepo, usecases::Error as ParameterError};
use ee_entities::{id::Id, user::{Role, User}};

use super::Cfg;
use crate::web::api::error::Error;

pub const COOKIE_SESSION_KEY: &str = "expat_eats_session";
pub const COOKIE_CSRF_KEY: &str = "expat_eats_csrf";

pub const SESSION_TTL: Duration = Duration::minutes(30);
pub const SESSION_TTL_REMEMBERED: Duration = Duration::days(30);

pub struct Version(pub &'static str);

type Result<T> = std::result::Result<T, Error>;

/// The decoded session cookie of an authenticated request.
///
/// Reading the guard refreshes the cookie, which gives sessions
/// their sliding expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Account {
    user_id: String,
    remember: bool,
}

impl Account {
    pub fn new(user_id: Id, remember: bool) -> Self {
        Self {
            user_id: user_id.into(),
            remember,
        }
    }

    pub fn user_id(&self) -> Id {
        Id::from(self.user_id.as_str())
    }

    /// Loads the account's user, verifying a minimum role.
    pub fn user_with_min_role<R: UserRepo>(&self, repo: &R, min_required_role: Role) -> Result<User> {
        let user = repo
            .get_user(&self.user_id())
            .map_err(|_| ParameterError::Unauthorized)?;
        if user.role < min_required_role {
            return Err(ParameterError::Forbidden.into());
        }
        Ok(user)
    }

    pub fn user<R: UserRepo>(&self, repo: &R) -> Result<User> {
        self.user_with_min_role(repo, Role::User)
    }

    fn session_cookie(&self, secure: bool) -> Cookie<'static> {
        let value = serde_json::to_string(self).expect("session cookie value");
        let max_age = if self.remember {
            SESSION_TTL_REMEMBERED
        } else {
            SESSION_TTL
        };
        Cookie::build((COOKIE_SESSION_KEY, value))
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .build()
    }

    /// Stores the session cookie after a successful login.
    pub fn store(&self, cookies: &CookieJar<'_>, cfg: &Cfg) {
        cookies.add_private(self.session_cookie(cfg.secure_cookies));
    }

    pub fn remove(cookies: &CookieJar<'_>) {
        cookies.remove_private(COOKIE_SESSION_KEY);
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(cookie) = request.cookies().get_private(COOKIE_SESSION_KEY) else {
            return Outcome::Error((Status::Unauthorized, ()));
        };
        let Ok(account) = serde_json::from_str::<Account>(cookie.value()) else {
            return Outcome::Error((Status::Unauthorized, ()));
        };
        // Sliding expiry: every authenticated request renews the cookie
        let cfg = try_outcome!(request.guard::<&State<Cfg>>().await);
        account.store(request.cookies(), cfg);
        Outcome::Success(account)
    }
}

/// Extracts the account and resolves it to a full user in one step.
pub struct AuthenticatedUser(pub User);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let account = try_outcome!(Account::from_request(request).await);
        let connections = try_outcome!(request.guard::<super::sqlite::Connections>().await);
        let user = connections
            .shared()
            .ok()
            .and_then(|db| db.get_user(&account.user_id()).ok());
        match user {
            Some(user) => Outcome::Success(Self(user)),
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}
