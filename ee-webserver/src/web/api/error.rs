use anyhow::anyhow;
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;

use ee_application::error::{AppError, BError};
use ee_core::{repositories::Error as RepoError, usecases::Error as ParameterError};

use super::json_error_response;

const ACCOUNT_LOCKED_CODE: &str = "ACCOUNT_LOCKED";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_input, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        Self::App(err.into())
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        Self::App(AppError::Business(err))
    }
}

impl From<ee_entities::password::ParseError> for Error {
    fn from(err: ee_entities::password::ParseError) -> Self {
        Self::App(err.into())
    }
}

impl From<ee_entities::email::EmailAddressParseError> for Error {
    fn from(err: ee_entities::email::EmailAddressParseError) -> Self {
        Self::App(AppError::from(ParameterError::from(err)))
    }
}

impl From<ee_entities::nonce::EmailNonceDecodingError> for Error {
    fn from(err: ee_entities::nonce::EmailNonceDecodingError) -> Self {
        Self::App(err.into())
    }
}

fn repo_error_status(err: &RepoError) -> Option<Status> {
    match err {
        RepoError::NotFound => Some(Status::NotFound),
        RepoError::AlreadyExists => Some(Status::Conflict),
        _ => None,
    }
}

fn parameter_error_response<'r, 'o: 'r>(
    req: &'r rocket::Request<'_>,
    err: &ParameterError,
) -> Option<response::Result<'o>> {
    use ParameterError as E;
    if let E::Credentials {
        attempts_remaining: Some(attempts),
    } = err
    {
        let message = format!("{err}. {attempts} attempt(s) remaining before lockout");
        return Some(json_error_response(req, &message, Status::Unauthorized, None));
    }
    let (status, code) = match err {
        E::Credentials { .. } | E::Unauthorized => (Status::Unauthorized, None),
        E::AccountLocked { .. } => (Status::Unauthorized, Some(ACCOUNT_LOCKED_CODE)),
        E::Forbidden => (Status::Forbidden, None),
        E::UserExists | E::AlreadyModerated => (Status::Conflict, None),
        E::Repo(repo_err) => {
            let status = repo_error_status(repo_err)?;
            return Some(json_error_response(req, err, status, None));
        }
        E::Title
        | E::Text
        | E::EmailAddress
        | E::Username
        | E::Password
        | E::RatingValue
        | E::Section
        | E::TimeFilter
        | E::ModerationDecision
        | E::ModerationNotes
        | E::InvalidPosition
        | E::TokenInvalid
        | E::TokenExpired => (Status::BadRequest, None),
    };
    Some(json_error_response(req, err, status, code))
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let AppError::Business(business_err) = &err {
                    match business_err {
                        BError::Parameter(parameter_err) => {
                            if let Some(response) = parameter_error_response(req, parameter_err) {
                                return response;
                            }
                        }
                        BError::Repo(repo_err) => {
                            if let Some(status) = repo_error_status(repo_err) {
                                return json_error_response(req, business_err, status, None);
                            }
                        }
                        _ => {}
                    }
                }
                log::error!("Error: {err}");
                json_error_response(req, &"Internal server error", Status::InternalServerError, None)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status, None),
            Error::Other(err) => {
                log::error!("Error: {err}");
                json_error_response(req, &"Internal server error", Status::InternalServerError, None)
            }
        }
    }
}
