use std::{fmt::Display, result};

use rocket::{
    self, catch, catchers, delete, get,
    http::Status,
    post, put,
    response::{self, Responder},
    routes,
    serde::json::{Error as JsonError, Json},
    Catcher, Route, State,
};

use ee_application::prelude as flows;
use ee_boundary as json;
use ee_core::{repositories::Pagination, usecases};
use ee_entities::{time::Timestamp, user::Role};

use super::{
    csrf::{self, Csrf},
    guards::*,
    ratelimit::{AuthRateLimit, GeneralRateLimit, LoginRateLimit, RATE_LIMIT_ERROR_CODE},
    sqlite, Cfg, GeoCoding,
};

mod community;
pub mod error;
mod events;
mod places;
mod saved;
mod users;
mod util;

pub use self::error::Error as ApiError;

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   csrf   --- //
        util::get_csrf_token,
        // ---   auth   --- //
        users::post_register,
        users::post_login,
        users::post_logout,
        users::get_current_user,
        users::post_request_password_reset,
        users::post_reset_password,
        // ---   places   --- //
        places::get_places,
        places::get_place,
        places::post_place,
        places::post_place_rating,
        places::post_approve_place,
        places::post_reject_place,
        // ---   events   --- //
        events::get_events,
        events::post_event,
        events::post_approve_event,
        events::post_reject_event,
        // ---   community   --- //
        community::get_posts,
        community::get_post,
        community::post_post,
        community::put_post,
        community::delete_post,
        community::post_like,
        community::post_comment,
        community::put_comment,
        community::delete_comment,
        // ---   saved stores   --- //
        saved::get_saved_stores,
        saved::post_saved_store,
        saved::delete_saved_store,
        // ---   misc   --- //
        util::get_version,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![
        catch_unauthorized,
        catch_forbidden,
        catch_not_found,
        catch_too_many_requests,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
    code: Option<&str>,
) -> response::Result<'o> {
    let boundary_error = json::Error {
        http_status: status.code,
        message: err.to_string(),
        code: code.map(ToOwned::to_owned),
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

#[catch(401)]
fn catch_unauthorized() -> Json<json::Error> {
    Json(json::Error {
        http_status: 401,
        message: "Authentication required".to_string(),
        code: None,
    })
}

// Guard-level 403s are CSRF failures; authorization errors carry
// their own response body.
#[catch(403)]
fn catch_forbidden() -> Json<json::Error> {
    Json(json::Error {
        http_status: 403,
        message: "Invalid CSRF token".to_string(),
        code: Some(csrf::CSRF_ERROR_CODE.to_string()),
    })
}

#[catch(404)]
fn catch_not_found() -> Json<json::Error> {
    Json(json::Error {
        http_status: 404,
        message: "The requested resource could not be found".to_string(),
        code: None,
    })
}

#[catch(429)]
fn catch_too_many_requests() -> Json<json::Error> {
    Json(json::Error {
        http_status: 429,
        message: "Too many requests, please try again later".to_string(),
        code: Some(RATE_LIMIT_ERROR_CODE.to_string()),
    })
}
