use time::Duration;

use super::prelude::*;

pub const TOKEN_VALIDITY: Duration = Duration::hours(24);

/// Issues a fresh password-reset token for the given account,
/// replacing any previous one.
pub fn request_password_reset<R>(repo: &R, email: &EmailAddress, now: Timestamp) -> Result<EmailNonce>
where
    R: UserRepo + UserTokenRepo,
{
    if repo.try_get_user_by_email(email)?.is_none() {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    let email_nonce = EmailNonce {
        email: email.clone(),
        nonce: Nonce::new(),
    };
    let token = UserToken {
        email_nonce,
        expires_at: now + TOKEN_VALIDITY,
    };
    Ok(repo.replace_user_token(token)?)
}

/// Consumes a reset token and replaces the account password.
/// Clears any pending login lockout.
pub fn reset_password<R>(
    repo: &R,
    email_nonce: &EmailNonce,
    new_password: Password,
    now: Timestamp,
) -> Result<()>
where
    R: UserRepo + UserTokenRepo,
{
    let token = repo
        .consume_user_token(email_nonce)
        .map_err(|_| Error::TokenInvalid)?;
    if token.expires_at < now {
        return Err(Error::TokenExpired);
    }
    let Some(mut user) = repo.try_get_user_by_email(&email_nonce.email)? else {
        return Err(Error::TokenInvalid);
    };
    user.password = new_password;
    user.failed_login_attempts = 0;
    user.locked_until = None;
    repo.update_user(&user)?;
    log::info!("Replaced password of user {}", user.username);
    Ok(())
}

pub fn delete_expired_user_tokens<R: UserTokenRepo>(repo: &R, now: Timestamp) -> Result<usize> {
    Ok(repo.delete_expired_user_tokens(now)?)
}

#[cfg(test)]
mod tests {
    use super::{
        super::{login, register, tests::MockDb, Credentials, NewUser},
        *,
    };

    fn db_with_user() -> MockDb {
        let db = MockDb::default();
        register(
            &db,
            NewUser {
                username: "maria".into(),
                email: "maria@example.com".parse().unwrap(),
                password: "secret1".into(),
            },
            Timestamp::from_secs(0),
        )
        .unwrap();
        db
    }

    #[test]
    fn request_and_reset() {
        let db = db_with_user();
        let now = Timestamp::from_secs(100);
        let email = "maria@example.com".parse::<EmailAddress>().unwrap();
        let email_nonce = request_password_reset(&db, &email, now).unwrap();
        reset_password(&db, &email_nonce, "newsecret".parse().unwrap(), now).unwrap();
        assert!(login(
            &db,
            &Credentials {
                username_or_email: "maria",
                password: "newsecret",
            },
            now,
        )
        .is_ok());
        // The token is single-use
        assert!(matches!(
            reset_password(&db, &email_nonce, "another1".parse().unwrap(), now),
            Err(Error::TokenInvalid)
        ));
    }

    #[test]
    fn reject_expired_token() {
        let db = db_with_user();
        let now = Timestamp::from_secs(100);
        let email = "maria@example.com".parse::<EmailAddress>().unwrap();
        let email_nonce = request_password_reset(&db, &email, now).unwrap();
        let too_late = now + TOKEN_VALIDITY + Duration::seconds(1);
        assert!(matches!(
            reset_password(&db, &email_nonce, "newsecret".parse().unwrap(), too_late),
            Err(Error::TokenExpired)
        ));
    }

    #[test]
    fn reject_request_for_unknown_account() {
        let db = db_with_user();
        let email = "nobody@example.com".parse::<EmailAddress>().unwrap();
        assert!(request_password_reset(&db, &email, Timestamp::from_secs(0)).is_err());
    }
}
