use std::str::FromStr;

use anyhow::{bail, Context};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_CONNECTION: &str =
    "Host=localhost;Database=mobileshop;Username=postgres;Password=postgres";

/// Deployment environment, only used to decide how fatal startup failures are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub env: AppEnv,
    pub expose_docs: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT").or_else(|| var("APP_PORT")) {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid port `{p}`"))?,
            None => 8080,
        };

        let database_url = match var("DATABASE_URL")
            .or_else(|| var("ConnectionStrings__DefaultConnection"))
        {
            Some(url) => url,
            None => {
                tracing::warn!("no database connection configured; using development default");
                DEFAULT_CONNECTION.to_string()
            }
        };

        let env = match var("APP_ENV").as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("development") | Some("dev") => AppEnv::Development,
            Some("production") | Some("prod") | None => AppEnv::Production,
            Some(other) => bail!("unknown APP_ENV `{other}`"),
        };

        let expose_docs = match var("EXPOSE_API_DOCS") {
            Some(v) => parse_flag(&v).with_context(|| format!("invalid EXPOSE_API_DOCS `{v}`"))?,
            None => true,
        };

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database_url,
            max_connections,
            env,
            expose_docs,
        })
    }

    pub fn is_development(&self) -> bool {
        self.env == AppEnv::Development
    }

    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        parse_connection_string(&self.database_url)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected a boolean"),
    }
}

/// Accepts either a `postgres://` URL or the `Key=Value;` form used by
/// hosting dashboards and turns it into driver options.
///
/// URLs are assumed to point at a hosted provider and get `sslmode=require`.
pub fn parse_connection_string(raw: &str) -> anyhow::Result<PgConnectOptions> {
    let raw = raw.trim();
    if raw.starts_with("postgres://") || raw.starts_with("postgresql://") {
        let opts = PgConnectOptions::from_str(raw).context("parse database url")?;
        return Ok(opts.ssl_mode(PgSslMode::Require));
    }

    let mut opts = PgConnectOptions::new();
    for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (key, value) = segment
            .split_once('=')
            .with_context(|| format!("malformed connection string segment `{segment}`"))?;
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "host" | "server" => opts = opts.host(value),
            "port" => {
                let port = value
                    .parse::<u16>()
                    .with_context(|| format!("invalid port `{value}`"))?;
                opts = opts.port(port);
            }
            "database" => opts = opts.database(value),
            "username" | "user id" | "userid" | "user" => opts = opts.username(value),
            "password" => opts = opts.password(value),
            "ssl mode" | "sslmode" => {
                let mode = value
                    .to_ascii_lowercase()
                    .parse::<PgSslMode>()
                    .with_context(|| format!("invalid ssl mode `{value}`"))?;
                opts = opts.ssl_mode(mode);
            }
            // e.g. "Trust Server Certificate", which has no driver equivalent
            _ => {}
        }
    }
    Ok(opts)
}

/// Loggable summary of the target database, without credentials.
pub fn describe(opts: &PgConnectOptions) -> String {
    format!(
        "host={} port={} database={}",
        opts.get_host(),
        opts.get_port(),
        opts.get_database().unwrap_or("<default>")
    )
}
