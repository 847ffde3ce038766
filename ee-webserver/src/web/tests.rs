use rocket::{config::Config as RocketCfg, local::blocking::Client, Route};

use ee_core::gateways::notify::NotificationGateway;
use ee_entities::{nonce::EmailNonce, user::User};

use super::{rocket_instance, Cfg, Gateways, InstanceOptions};

pub mod prelude {
    pub const DUMMY_VERSION: &str = "0.0.0-test";

    pub use rocket::{
        http::{ContentType, Cookie, Header, Status},
        local::blocking::{Client, LocalResponse},
    };

    pub use super::{setup, DummyNotifyGW};
}

pub struct DummyNotifyGW;

impl NotificationGateway for DummyNotifyGW {
    fn user_registered(&self, _: &User) {}
    fn user_reset_password_requested(&self, _: &EmailNonce) {}
}

pub fn setup(mounts: Vec<(&'static str, Vec<Route>)>) -> (Client, ee_db_sqlite::Connections) {
    let db = ee_db_sqlite::Connections::init(":memory:", 1).unwrap();
    ee_db_sqlite::run_embedded_database_migrations(db.exclusive().unwrap());
    let options = InstanceOptions {
        mounts,
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg: Cfg {
            secure_cookies: false,
        },
        version: prelude::DUMMY_VERSION,
    };
    let gateways = Gateways {
        geocoding: None,
        notify: Box::new(DummyNotifyGW),
    };
    let rocket = rocket_instance(options, db.clone(), gateways);
    let client = Client::tracked(rocket).unwrap();
    (client, db)
}
