#[macro_use]
extern crate log;

mod delete_post;
mod moderate_event;
mod moderate_place;
mod rate_place;
mod reset_password;

pub mod prelude {
    pub use super::{
        delete_post::*, moderate_event::*, moderate_place::*, rate_place::*, reset_password::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use ee_core::{entities::*, repositories::*, usecases, RepoError};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use ee_db_sqlite::Connections;
}
