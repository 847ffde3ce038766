use ee_core::gateways::notify::NotificationGateway;

use super::*;

/// Issues a password-reset token and notifies the account's e-mail
/// address. The notification is sent after the token has been
/// committed.
pub fn reset_password_request(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    email: &EmailAddress,
    now: Timestamp,
) -> Result<()> {
    let email_nonce = {
        let db = connections.exclusive()?;
        usecases::request_password_reset(&db, email, now)?
    };
    notify.user_reset_password_requested(&email_nonce);
    Ok(())
}

/// Consumes a reset token and stores the new password.
pub fn reset_password_with_email_nonce(
    connections: &sqlite::Connections,
    email_nonce: EmailNonce,
    new_password: Password,
    now: Timestamp,
) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| {
        usecases::reset_password(conn, &email_nonce, new_password, now)
    })?;
    Ok(())
}
