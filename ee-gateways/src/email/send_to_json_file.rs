use std::{fs, path::PathBuf};

use serde::Serialize;

use ee_core::gateways::email::EmailGateway;
use ee_entities::email::EmailAddress;

/// Writes outgoing e-mails into JSON files instead of sending them.
/// For local testing purposes.
#[derive(Debug, Clone)]
pub struct SendToJsonFile {
    dir: PathBuf,
}

impl SendToJsonFile {
    pub fn try_new(dir: PathBuf) -> anyhow::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

#[derive(Debug, Serialize)]
struct MailFile<'a> {
    recipients: Vec<&'a str>,
    subject: &'a str,
    body: &'a str,
}

impl EmailGateway for SendToJsonFile {
    fn compose_and_send(&self, recipients: &[EmailAddress], subject: &str, body: &str) {
        let mail = MailFile {
            recipients: recipients.iter().map(EmailAddress::as_str).collect(),
            subject,
            body,
        };
        let file_name = format!("{}.json", uuid::Uuid::new_v4().as_simple());
        let path = self.dir.join(file_name);
        match fs::File::create(&path)
            .map_err(anyhow::Error::from)
            .and_then(|file| serde_json::to_writer_pretty(file, &mail).map_err(Into::into))
        {
            Ok(()) => log::info!("Saved e-mail to {}", path.display()),
            Err(err) => log::error!("Failed to save e-mail to {}: {err}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_mail_file() {
        let dir = std::env::temp_dir().join(format!("ee-mails-{}", uuid::Uuid::new_v4()));
        let gw = SendToJsonFile::try_new(dir.clone()).unwrap();
        gw.compose_and_send(
            &["maria@example.com".parse().unwrap()],
            "Hello",
            "A body",
        );
        let files: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(1, files.len());
        fs::remove_dir_all(dir).unwrap();
    }
}
