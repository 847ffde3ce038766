use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: EmailAddress,
    pub password: String,
}

pub fn register<R: UserRepo>(repo: &R, new_user: NewUser, now: Timestamp) -> Result<User> {
    let NewUser {
        username,
        email,
        password,
    } = new_user;
    if !validate::is_valid_username(&username) {
        return Err(Error::Username);
    }
    let password = password.parse::<Password>()?;
    if repo.try_get_user_by_username(&username)?.is_some()
        || repo.try_get_user_by_email(&email)?.is_some()
    {
        return Err(Error::UserExists);
    }
    let user = User {
        id: Id::new(),
        username,
        email,
        password,
        role: Role::User,
        failed_login_attempts: 0,
        locked_until: None,
        last_login_at: None,
        created_at: now,
    };
    log::debug!("Creating new user {}", user.username);
    repo.create_user(&user)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.parse().unwrap(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn create_two_users() {
        let db = MockDb::default();
        let now = Timestamp::from_secs(0);
        assert!(register(&db, new_user("maria", "maria@example.com"), now).is_ok());
        assert!(register(&db, new_user("joao", "joao@example.com"), now).is_ok());
        assert_eq!(2, db.count_users().unwrap());
        assert!(db
            .try_get_user_by_username("maria")
            .unwrap()
            .is_some());
    }

    #[test]
    fn reject_duplicate_username_or_email() {
        let db = MockDb::default();
        let now = Timestamp::from_secs(0);
        register(&db, new_user("maria", "maria@example.com"), now).unwrap();
        assert!(matches!(
            register(&db, new_user("maria", "other@example.com"), now),
            Err(Error::UserExists)
        ));
        assert!(matches!(
            register(&db, new_user("other", "maria@example.com"), now),
            Err(Error::UserExists)
        ));
    }

    #[test]
    fn reject_invalid_input() {
        let db = MockDb::default();
        let now = Timestamp::from_secs(0);
        assert!(matches!(
            register(&db, new_user("x", "x@example.com"), now),
            Err(Error::Username)
        ));
        let short_password = NewUser {
            username: "maria".into(),
            email: "maria@example.com".parse().unwrap(),
            password: "short".into(),
        };
        assert!(matches!(
            register(&db, short_password, now),
            Err(Error::Password)
        ));
    }

    #[test]
    fn new_users_are_not_admins_and_have_a_hashed_password() {
        let db = MockDb::default();
        register(
            &db,
            new_user("maria", "maria@example.com"),
            Timestamp::from_secs(0),
        )
        .unwrap();
        let user = db.users.borrow()[0].clone();
        assert_eq!(Role::User, user.role);
        assert_ne!("secret1", user.password.as_ref());
        assert!(user.password.verify("secret1"));
    }
}
