mod error;
mod events;
mod login;
mod moderate;
mod places;
mod posts;
mod ratings;
mod register;
mod reset_password;
mod saved_stores;


pub use self::{
    error::Error, events::*, login::*, moderate::*, places::*, posts::*, ratings::*, register::*,
    reset_password::*, saved_stores::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}
use self::prelude::*;

/// Grants access if the user is the owner of the content or an admin.
fn authorize_owner_or_admin(user: &User, owner_id: &Id) -> Result<()> {
    if user.role >= Role::Admin || user.id == *owner_id {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}
