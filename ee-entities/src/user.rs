use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use thiserror::Error;

use crate::{email::EmailAddress, id::Id, password::Password, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id                    : Id,
    pub username              : String,
    pub email                 : EmailAddress,
    pub password              : Password,
    pub role                  : Role,
    pub failed_login_attempts : u16,
    pub locked_until          : Option<Timestamp>,
    pub last_login_at         : Option<Timestamp>,
    pub created_at            : Timestamp,
}

pub type RolePrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Role {
    #[default]
    User  = 0,
    Admin = 1,
}

#[derive(Debug, Error)]
#[error("Invalid role primitive: {0}")]
pub struct InvalidRolePrimitive(RolePrimitive);

impl TryFrom<RolePrimitive> for Role {
    type Error = InvalidRolePrimitive;
    fn try_from(from: RolePrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidRolePrimitive(from))
    }
}

impl From<Role> for RolePrimitive {
    fn from(from: Role) -> Self {
        from.to_i16().expect("role primitive")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_primitive_round_trip() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(role, Role::try_from(RolePrimitive::from(role)).unwrap());
        }
        assert!(Role::try_from(7).is_err());
    }

    #[test]
    fn admin_outranks_user() {
        assert!(Role::Admin > Role::User);
    }
}
