use rocket::{config::Config as RocketCfg, Build, Rocket, Route};

use ee_core::gateways::{geocode::GeocodingGateway, notify::NotificationGateway};

pub mod api;
mod csrf;
mod guards;
mod ratelimit;
mod sqlite;

#[cfg(test)]
pub mod tests;

/// Web layer configuration.
#[derive(Debug, Clone)]
pub struct Cfg {
    /// Set the `Secure` attribute on session cookies. Disabled for
    /// local development over plain HTTP.
    pub secure_cookies: bool,
}

/// The geocoding capability. Optional; place submissions simply skip
/// address resolution when it is absent.
pub struct GeoCoding(pub Option<Box<dyn GeocodingGateway + Send + Sync>>);

pub struct Notify(pub Box<dyn NotificationGateway + Send + Sync>);

impl std::ops::Deref for Notify {
    type Target = dyn NotificationGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Gateways {
    geocoding: Option<Box<dyn GeocodingGateway + Send + Sync>>,
    notify: Box<dyn NotificationGateway + Send + Sync>,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: ee_db_sqlite::Connections,
    gateways: Gateways,
) -> Rocket<Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Gateways { geocoding, notify } = gateways;

    log::info!("Deleting expired password-reset tokens...");
    if let Err(err) = ee_core::usecases::delete_expired_user_tokens(
        &db.exclusive().unwrap(),
        ee_entities::time::Timestamp::now(),
    ) {
        log::warn!("Failed to delete expired password-reset tokens: {err}");
    }

    let r = match rocket_cfg {
        Some(rocket_cfg) => rocket::custom(rocket_cfg),
        None => rocket::build(),
    };

    let mut instance = r
        .manage(sqlite::Connections::from(db))
        .manage(csrf::CsrfState::new())
        .manage(ratelimit::RateLimits::default())
        .manage(GeoCoding(geocoding))
        .manage(Notify(notify))
        .manage(guards::Version(version))
        .manage(cfg)
        .register("/", api::catchers());

    for (base, routes) in mounts {
        instance = instance.mount(base, routes);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: ee_db_sqlite::Connections,
    enable_cors: bool,
    cfg: Cfg,
    geocoding: Option<Box<dyn GeocodingGateway + Send + Sync>>,
    notify: Box<dyn NotificationGateway + Send + Sync>,
    version: &'static str,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let gateways = Gateways { geocoding, notify };
    let instance = rocket_instance(options, db, gateways);
    let server_task = if enable_cors {
        let cors = rocket_cors::CorsOptions::default().to_cors().unwrap();
        instance.attach(cors).launch()
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        log::error!("Unable to run web server: {err}");
    }
}
