use anyhow::Result;

use ee_core::gateways::{geocode::GeocodingGateway, notify::NotificationGateway};
use ee_gateways::{
    email::{send_to_json_file::SendToJsonFile, sendgrid::SendGrid},
    geoapify::Geoapify,
    notify::{DummyNotifyGateway, Notify},
};

use crate::config;

pub fn geocoding_gateway(
    cfg: &config::Config,
) -> Option<Box<dyn GeocodingGateway + Send + Sync>> {
    match &cfg.geocoding.gateway {
        Some(config::GeocodingGateway::Geoapify { api_key }) => {
            log::info!("Use Geoapify geocoding gateway");
            Some(Box::new(Geoapify::new(api_key.clone())))
        }
        None => {
            log::warn!("No geocoding gateway configured: address resolution is disabled");
            None
        }
    }
}

pub fn notification_gateway(
    cfg: &config::Config,
) -> Result<Box<dyn NotificationGateway + Send + Sync>> {
    Ok(match &cfg.email.gateway {
        Some(config::EmailGateway::SendGrid {
            api_key,
            sender_address,
        }) => {
            log::info!("Use SendGrid email gateway");
            Box::new(Notify::new(SendGrid {
                api_key: api_key.clone(),
                sender_address: sender_address.clone(),
            }))
        }
        Some(config::EmailGateway::EmailToJsonFile { dir }) => {
            Box::new(Notify::new(SendToJsonFile::try_new(dir.clone())?))
        }
        None => {
            log::warn!("No email gateway configured: notifications are disabled");
            Box::new(DummyNotifyGateway)
        }
    })
}
