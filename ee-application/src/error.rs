use std::io;

use thiserror::Error;

use ee_core::{repositories::Error as RepoError, usecases::Error as ParameterError};

pub use ee_core::repositories;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

impl From<ee_entities::password::ParseError> for AppError {
    fn from(err: ee_entities::password::ParseError) -> Self {
        BError::from(err).into()
    }
}

impl From<ee_entities::nonce::EmailNonceDecodingError> for AppError {
    fn from(err: ee_entities::nonce::EmailNonceDecodingError) -> Self {
        BError::from(err).into()
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for BError {
    fn from(s: String) -> Self {
        Self::Internal(s)
    }
}

impl From<ee_entities::password::ParseError> for BError {
    fn from(_: ee_entities::password::ParseError) -> Self {
        Self::Parameter(ParameterError::Password)
    }
}

impl From<ee_entities::nonce::EmailNonceDecodingError> for BError {
    fn from(_: ee_entities::nonce::EmailNonceDecodingError) -> Self {
        Self::Parameter(ParameterError::TokenInvalid)
    }
}
