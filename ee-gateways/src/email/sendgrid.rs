use serde_json::json;

use ee_core::gateways::email::EmailGateway;
use ee_entities::email::EmailAddress;

const API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// E-mail delivery through the SendGrid v3 API.
#[derive(Debug, Clone)]
pub struct SendGrid {
    pub api_key: String,
    pub sender_address: EmailAddress,
}

impl EmailGateway for SendGrid {
    fn compose_and_send(&self, recipients: &[EmailAddress], subject: &str, body: &str) {
        if recipients.is_empty() {
            return;
        }
        let personalizations: Vec<_> = recipients
            .iter()
            .map(|to| json!({ "to": [{ "email": to.as_str() }] }))
            .collect();
        let payload = json!({
            "personalizations": personalizations,
            "from": { "email": self.sender_address.as_str() },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });
        let client = reqwest::blocking::Client::new();
        let res = client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send();
        match res {
            Ok(res) => {
                if res.status().is_success() {
                    log::debug!("Mail provider response: {:?}", res.status());
                } else {
                    log::error!("Could not send email: response status: {:?}", res.status());
                }
            }
            Err(err) => {
                log::error!("Could not send email: {err}");
            }
        }
    }
}
