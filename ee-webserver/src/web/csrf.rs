use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::{
    http::{Cookie, CookieJar, Method, SameSite, Status},
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};
use serde::{Deserialize, Serialize};

use ee_entities::nonce::Nonce;

use super::guards::COOKIE_CSRF_KEY;

/// Header carrying the token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Fixed error code returned on CSRF validation failures.
pub const CSRF_ERROR_CODE: &str = "EBADCSRFTOKEN";

const TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The per-session secret the token is bound to.
    sub: String,
    /// Expiry time as unix timestamp.
    exp: usize,
}

struct Key {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Key {
    fn random() -> Self {
        let secret = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            rand::random::<[u8; 32]>(),
        );
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// Issues and verifies tokens that are cryptographically bound to a
/// per-session secret. The signing key lives only in this process.
pub struct CsrfState {
    key: Key,
}

impl CsrfState {
    pub fn new() -> Self {
        Self { key: Key::random() }
    }

    pub fn generate_token(&self, session_secret: &str) -> anyhow::Result<String> {
        let exp = usize::try_from(
            ee_entities::time::Timestamp::now().as_secs() + TOKEN_TTL_SECONDS,
        )?;
        let claims = Claims {
            sub: session_secret.to_string(),
            exp,
        };
        Ok(encode(&Header::default(), &claims, &self.key.encoding_key)?)
    }

    /// Fails closed: a missing secret or token is invalid.
    pub fn validate_token(&self, session_secret: Option<&str>, token: Option<&str>) -> bool {
        let (Some(session_secret), Some(token)) = (session_secret, token) else {
            return false;
        };
        match decode::<Claims>(token, &self.key.decoding_key, &Validation::default()) {
            Ok(data) => data.claims.sub == session_secret,
            Err(_) => false,
        }
    }
}

/// Lazily creates the per-session secret, once.
pub fn session_secret(cookies: &CookieJar<'_>) -> String {
    if let Some(cookie) = cookies.get_private(COOKIE_CSRF_KEY) {
        return cookie.value().to_string();
    }
    let secret = Nonce::new().to_string();
    cookies.add_private(
        Cookie::build((COOKIE_CSRF_KEY, secret.clone()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    );
    secret
}

/// Request guard rejecting state-changing requests without a valid
/// session-bound token. Safe methods pass through.
pub struct Csrf;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Csrf {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        if matches!(
            request.method(),
            Method::Get | Method::Head | Method::Options
        ) {
            return Outcome::Success(Csrf);
        }
        let state = try_outcome!(request.guard::<&State<CsrfState>>().await);
        let secret = request
            .cookies()
            .get_private(COOKIE_CSRF_KEY)
            .map(|cookie| cookie.value().to_string());
        let token = request.headers().get_one(CSRF_HEADER);
        if state.validate_token(secret.as_deref(), token) {
            Outcome::Success(Csrf)
        } else {
            Outcome::Error((Status::Forbidden, ()))
        }
    }
}
