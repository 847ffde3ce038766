use crate::entities::{EmailNonce, User};

pub trait NotificationGateway {
    fn user_registered(&self, user: &User);
    fn user_reset_password_requested(&self, email_nonce: &EmailNonce);
}
