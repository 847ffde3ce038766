use std::str::FromStr;

use lazy_static::lazy_static;
use pwhash::bcrypt::{self, BcryptSetup};
use thiserror::Error;

const DEFAULT_BCRYPT_COST: u32 = 10;

lazy_static! {
    // The cost factor is fixed per process and can be tuned
    // through the environment, e.g. lowered for test runs.
    static ref BCRYPT_COST: u32 = std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BCRYPT_COST);
}

/// A salted bcrypt password hash.
///
/// The clear text is consumed when parsing and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const fn min_len() -> usize {
        6
    }

    /// Wraps an already hashed password, e.g. loaded from the database.
    pub const fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn verify(&self, plain: &str) -> bool {
        bcrypt::verify(plain, &self.0)
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Password> for String {
    fn from(from: Password) -> Self {
        from.0
    }
}

#[derive(Debug, Error)]
#[error("Invalid password")]
pub struct ParseError;

impl FromStr for Password {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().len() < Self::min_len() {
            return Err(ParseError);
        }
        let setup = BcryptSetup {
            cost: Some(*BCRYPT_COST),
            ..Default::default()
        };
        let hash = bcrypt::hash_with(setup, s).map_err(|_| ParseError)?;
        Ok(Self(hash))
    }
}
