use thiserror::Error;

use crate::repositories;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("The text must not be empty")]
    Text,
    #[error("Invalid e-mail address")]
    EmailAddress,
    #[error("Invalid username")]
    Username,
    #[error("Invalid password")]
    Password,
    #[error("The username or e-mail address is already taken")]
    UserExists,
    #[error("Invalid username/e-mail or password")]
    Credentials { attempts_remaining: Option<u16> },
    #[error("Account is locked. Try again in {minutes_remaining} minute(s)")]
    AccountLocked { minutes_remaining: i64 },
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Invalid forum section")]
    Section,
    #[error("Invalid time filter")]
    TimeFilter,
    #[error("Invalid moderation decision")]
    ModerationDecision,
    #[error("Rejecting requires notes")]
    ModerationNotes,
    #[error("The entry has already been moderated")]
    AlreadyModerated,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("Token invalid")]
    TokenInvalid,
    #[error("Token expired")]
    TokenExpired,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<ee_entities::password::ParseError> for Error {
    fn from(_: ee_entities::password::ParseError) -> Self {
        Self::Password
    }
}

impl From<ee_entities::email::EmailAddressParseError> for Error {
    fn from(_: ee_entities::email::EmailAddressParseError) -> Self {
        Self::EmailAddress
    }
}

impl From<ee_entities::nonce::EmailNonceDecodingError> for Error {
    fn from(_: ee_entities::nonce::EmailNonceDecodingError) -> Self {
        Self::TokenInvalid
    }
}
