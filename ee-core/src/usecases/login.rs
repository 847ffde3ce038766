use time::Duration;

use super::prelude::*;

pub const MAX_FAILED_LOGIN_ATTEMPTS: u16 = 5;
pub const LOCKOUT_DURATION: Duration = Duration::minutes(30);

pub struct Credentials<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

fn invalid_credentials(attempts_remaining: Option<u16>) -> Error {
    Error::Credentials { attempts_remaining }
}

fn minutes_remaining(locked_until: Timestamp, now: Timestamp) -> i64 {
    let secs = (locked_until - now).whole_seconds().max(0);
    (secs + 59) / 60
}

fn find_user<R: UserRepo>(repo: &R, username_or_email: &str) -> Result<Option<User>> {
    if let Some(user) = repo.try_get_user_by_username(username_or_email)? {
        return Ok(Some(user));
    }
    let Ok(email) = username_or_email.parse::<EmailAddress>() else {
        return Ok(None);
    };
    repo.try_get_user_by_email(&email).map_err(Error::Repo)
}

/// Verifies the given credentials and maintains the per-account
/// lockout state.
///
/// Accounts are locked for [`LOCKOUT_DURATION`] after
/// [`MAX_FAILED_LOGIN_ATTEMPTS`] consecutive failures. While locked,
/// the password is not even checked. An expired lock is cleared before
/// the attempt is evaluated, so the next window starts from zero.
pub fn login<R: UserRepo>(repo: &R, credentials: &Credentials, now: Timestamp) -> Result<User> {
    let Some(mut user) = find_user(repo, credentials.username_or_email)? else {
        return Err(invalid_credentials(None));
    };

    if let Some(locked_until) = user.locked_until {
        if locked_until > now {
            log::debug!(
                "Rejecting login for locked account {} until {}",
                user.username,
                locked_until
            );
            return Err(Error::AccountLocked {
                minutes_remaining: minutes_remaining(locked_until, now),
            });
        }
        user.locked_until = None;
        user.failed_login_attempts = 0;
    }

    if user.password.verify(credentials.password) {
        user.failed_login_attempts = 0;
        user.locked_until = None;
        user.last_login_at = Some(now);
        repo.update_user(&user)?;
        Ok(user)
    } else {
        user.failed_login_attempts += 1;
        let locked = user.failed_login_attempts >= MAX_FAILED_LOGIN_ATTEMPTS;
        if locked {
            user.locked_until = Some(now + LOCKOUT_DURATION);
            log::info!(
                "Locking account {} after {} failed login attempts",
                user.username,
                user.failed_login_attempts
            );
        }
        repo.update_user(&user)?;
        if locked {
            Err(Error::AccountLocked {
                minutes_remaining: LOCKOUT_DURATION.whole_minutes(),
            })
        } else {
            Err(invalid_credentials(Some(
                MAX_FAILED_LOGIN_ATTEMPTS - user.failed_login_attempts,
            )))
        }
    }
}
