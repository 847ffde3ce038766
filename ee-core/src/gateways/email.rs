use crate::entities::EmailAddress;

pub trait EmailGateway {
    fn compose_and_send(&self, recipients: &[EmailAddress], subject: &str, body: &str);
}
