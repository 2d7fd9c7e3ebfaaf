pub mod facility;
pub mod geo;
pub mod health;

use crate::error::{ConfigError, InitializationError};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::env;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

pub const ENV_VAR_PREFIX: &str = "LANDING__";
pub const SETTINGS_FILE: &str = "Settings.toml";
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub postgres: Option<PostgresConfig>,
    #[serde(default)]
    pub server: ServerConfig,
    pub seeder: Option<SeederConfig>,
    #[serde(default)]
    pub cost_engine: CostEngineConfig,
}

impl Config {
    /// The Postgres section is optional so that services without a database can share the loader.
    pub fn postgres(&self) -> Result<&PostgresConfig, ConfigError> {
        self.postgres
            .as_ref()
            .ok_or(ConfigError::MissingSection("postgres"))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.request_timeout).map_err(|e| {
            ConfigError::InvalidDuration {
                value: self.request_timeout.clone(),
                source: e,
            }
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeederConfig {
    pub seed_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CostEngineConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_cost_engine_port")]
    pub port: u16,
}

impl CostEngineConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for CostEngineConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_cost_engine_port(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cost_engine_port() -> u16 {
    3001
}

fn default_request_timeout() -> String {
    "10s".to_string()
}

/// Loads configuration from `Settings.toml`, then `LANDING__`-prefixed env vars.
///
/// The conventional `DATABASE_URL` and `PORT` variables are honored as well and
/// take precedence, so the service runs unchanged on most container platforms.
pub fn load_config() -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"))
        .merge(
            Env::raw()
                .only(&["DATABASE_URL"])
                .map(|_| "postgres.connection_string".into()),
        )
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
        .extract::<Config>()?)
}

pub mod error {
    use thiserror::Error;
    use tracing::dispatcher::SetGlobalDefaultError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration: {0}")]
        Figment(#[from] figment::Error),
        #[error("missing configuration section [{0}]")]
        MissingSection(&'static str),
        #[error("invalid duration {value:?}: {source}")]
        InvalidDuration {
            value: String,
            #[source]
            source: humantime::DurationError,
        },
    }

    #[derive(Debug, Error)]
    pub enum InitializationError {
        #[error(transparent)]
        Tracing(#[from] SetGlobalDefaultError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Migration(#[from] sqlx::migrate::MigrateError),
        #[error(transparent)]
        Db(#[from] sqlx::Error),
        #[error(transparent)]
        Io(#[from] std::io::Error),
    }
}

/// Installs the global tracing subscriber, filtered by `RUST_LOG`.
///
/// Output is compact text unless `LOG_FORMAT=json`.
pub fn init_tracing() -> Result<(), InitializationError> {
    let json = env::var(LOG_FORMAT_ENV_VAR)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_current_span(false)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = tracing_subscriber::fmt()
            .compact()
            .with_file(true)
            .with_line_number(true)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

#[instrument(skip_all)]
pub async fn initialize_db(
    pg_config: &PostgresConfig,
    migrate: bool,
) -> Result<Pool<Postgres>, InitializationError> {
    let pool = PgPoolOptions::new()
        .max_connections(pg_config.max_connections)
        .connect(&pg_config.connection_string)
        .await?;

    info!(name: "db.connected", "db pool created and connected");

    if migrate {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(name: "db.migrated", "db migrations applied");
    }

    Ok(pool)
}

pub async fn shutdown_listener(token: Option<CancellationToken>) {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(name: "signal.ctrlc.received", "received Ctrl+C signal, shutting down"),
        _ = terminate => info!(name: "signal.sigterm.received", "received SIGTERM signal, shutting down"),
    }

    if let Some(token) = token {
        token.cancel();
    }
}
