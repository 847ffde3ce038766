use ee_core::gateways::{email::EmailGateway, notify::NotificationGateway};
use ee_entities::{email::EmailAddress, nonce::EmailNonce, user::User};

/// Composes user-facing notification e-mails and hands them to the
/// configured e-mail gateway.
pub struct Notify(Box<dyn EmailGateway + Send + Sync + 'static>);

impl Notify {
    pub fn new<G>(gw: G) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self(Box::new(gw))
    }
}

impl NotificationGateway for Notify {
    fn user_registered(&self, user: &User) {
        let subject = "Welcome to ExpatEats";
        let body = format!(
            "Hello {},\n\n\
             your ExpatEats account has been created.\n\n\
             Happy exploring!",
            user.username
        );
        self.0
            .compose_and_send(std::slice::from_ref(&user.email), subject, &body);
    }

    fn user_reset_password_requested(&self, email_nonce: &EmailNonce) {
        let subject = "ExpatEats password reset";
        let body = format!(
            "A password reset was requested for your account.\n\n\
             Your reset token:\n\n{}\n\n\
             The token expires after 24 hours. If you did not request\n\
             a reset you can ignore this message.",
            email_nonce.encode_to_string()
        );
        let recipients = [email_nonce.email.clone()];
        self.0.compose_and_send(&recipients, subject, &body);
    }
}

/// Discards every notification. Used when no e-mail gateway is
/// configured.
pub struct DummyNotifyGateway;

impl NotificationGateway for DummyNotifyGateway {
    fn user_registered(&self, _: &User) {
        log::debug!("Cannot send e-mails because no e-mail gateway is configured");
    }
    fn user_reset_password_requested(&self, _: &EmailNonce) {
        log::debug!("Cannot send e-mails because no e-mail gateway is configured");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use ee_entities::nonce::Nonce;

    #[derive(Default, Clone)]
    struct RecordingGateway {
        sent: Arc<Mutex<Vec<(Vec<String>, String)>>>,
    }

    impl EmailGateway for RecordingGateway {
        fn compose_and_send(&self, recipients: &[EmailAddress], subject: &str, _body: &str) {
            self.sent.lock().unwrap().push((
                recipients.iter().map(|r| r.as_str().to_string()).collect(),
                subject.to_string(),
            ));
        }
    }

    #[test]
    fn reset_mail_goes_to_the_requesting_address() {
        let gw = RecordingGateway::default();
        let notify = Notify::new(gw.clone());
        let email_nonce = EmailNonce {
            email: "maria@example.com".parse().unwrap(),
            nonce: Nonce::new(),
        };
        notify.user_reset_password_requested(&email_nonce);
        let sent = gw.sent.lock().unwrap();
        assert_eq!(1, sent.len());
        assert_eq!(vec!["maria@example.com".to_string()], sent[0].0);
    }
}
