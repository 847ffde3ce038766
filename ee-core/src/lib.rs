pub mod bbox;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use ee_entities::{
        activity::*, address::*, email::*, event::*, geo::*, id::*, moderation::*, nonce::*,
        password::*, place::*, post::*, rating::*, saved::*, time::*, user::*,
    };
}

pub use repositories::Error as RepoError;
