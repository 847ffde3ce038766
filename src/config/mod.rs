use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};

use ee_entities::email::EmailAddress;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "expateats.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_GEOAPIFY_API_KEY: &str = "GEOAPIFY_API_KEY";
const ENV_NAME_SENDGRID_API_KEY: &str = "SENDGRID_API_KEY";
const ENV_NAME_MAIL_SENDER_ADDRESS: &str = "MAIL_GATEWAY_SENDER_ADDRESS";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub email: Email,
    pub geocoding: Geocoding,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    /// Environment variables take precedence over the configuration
    /// file. Optional gateways can be enabled through them alone.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            self.db.conn_sqlite = db_url;
        }
        if let Ok(api_key) = env::var(ENV_NAME_GEOAPIFY_API_KEY) {
            self.geocoding.gateway = Some(GeocodingGateway::Geoapify { api_key });
        }
        if let Ok(api_key) = env::var(ENV_NAME_SENDGRID_API_KEY) {
            let sender_address = env::var(ENV_NAME_MAIL_SENDER_ADDRESS)
                .map_err(|_| {
                    anyhow!("{ENV_NAME_SENDGRID_API_KEY} requires {ENV_NAME_MAIL_SENDER_ADDRESS}")
                })?
                .parse()?;
            self.email.gateway = Some(EmailGateway::SendGrid {
                api_key,
                sender_address,
            });
        }
        Ok(())
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub enable_cors: bool,
    pub secure_cookies: bool,
}

pub struct Email {
    pub gateway: Option<EmailGateway>,
}

#[derive(Clone)]
pub enum EmailGateway {
    SendGrid {
        api_key: String,
        sender_address: EmailAddress,
    },
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

pub enum GeocodingGateway {
    Geoapify { api_key: String },
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            email,
            geocoding,
            gateway,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let email_gateway = match email.and_then(|m| m.gateway) {
            Some(gw_name) => {
                let toml_name = toml::to_string(&gw_name).unwrap();
                let gateway = gateway.clone().unwrap_or_default();

                let gw = match gw_name {
                    raw::EmailGateway::Sendgrid => {
                        let raw::SendGrid {
                            api_key,
                            sender_address,
                        } = gateway.sendgrid.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        let sender_address = sender_address.parse()?;
                        EmailGateway::SendGrid {
                            api_key,
                            sender_address,
                        }
                    }
                    raw::EmailGateway::EmailToJsonFile => {
                        let raw::EmailToJsonFile { dir } =
                            gateway.email_to_json_file.ok_or_else(|| {
                                anyhow!("Missing '{toml_name}' gateway configuration")
                            })?;
                        log::info!("Use JSON file email gateway ({})", dir.display());
                        EmailGateway::EmailToJsonFile { dir }
                    }
                };
                Some(gw)
            }
            None => None,
        };

        let email = Email {
            gateway: email_gateway,
        };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let toml_name = toml::to_string(&gw_name).unwrap();
                let gateway = gateway.ok_or_else(|| anyhow!("Missing gateway configuration"))?;
                let gw = match gw_name {
                    raw::GeocodingGateway::Geoapify => {
                        let raw::Geoapify { api_key } = gateway.geoapify.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        GeocodingGateway::Geoapify { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::WebServer {
            cors,
            secure_cookies,
        } = webserver.unwrap_or_default();

        let webserver = WebServer {
            enable_cors: cors,
            secure_cookies,
        };

        Ok(Self {
            db,
            webserver,
            email,
            geocoding,
        })
    }
}
