use anyhow::{anyhow, Result};
use clap::Parser;

mod cli;
mod config;
mod gateways;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = cli::Args::parse();
    let mut cfg = config::Config::try_load_from_file_or_default(args.config.as_deref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }

    log::info!("Opening database {}", cfg.db.conn_sqlite);
    let connections =
        ee_db_sqlite::Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    ee_db_sqlite::run_embedded_database_migrations(
        connections
            .exclusive()
            .map_err(|err| anyhow!("Failed to open database for migrations: {err}"))?,
    );

    let geocoding = gateways::geocoding_gateway(&cfg);
    let notify = gateways::notification_gateway(&cfg)?;

    let web_cfg = ee_webserver::Cfg {
        secure_cookies: cfg.webserver.secure_cookies,
    };
    log::info!("Starting web server (v{VERSION})");
    ee_webserver::run(
        connections,
        cfg.webserver.enable_cors,
        web_cfg,
        geocoding,
        notify,
        VERSION,
    )
    .await;
    Ok(())
}
