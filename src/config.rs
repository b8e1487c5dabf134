use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub session_days: i64,
}

impl Config {
    /// Reads the environment, after pulling in a `.env` file if there is one.
    pub fn load() -> anyhow::Result<Self> {
        if let Err(err) = dotenv::dotenv() {
            info!("No .env file loaded: {err}");
        }

        Ok(Self {
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:8080")?,
            database_url: try_load("DATABASE_URL", "sqlite://meetup.db")?,
            db_max_connections: try_load("DB_MAX_CONNECTIONS", "16")?,
            session_days: try_load("SESSION_DAYS", "30")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let value = dotenv::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });

    value
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow::anyhow!("{e}")
        })
        .with_context(|| format!("environment variable {key} is misconfigured"))
}
