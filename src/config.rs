//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use crate::auth::StaticCredentials;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "employee_base=info,tower_http=info";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the listener to
    pub server_host: IpAddr,
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file with `{"user": "<bcrypt hash>"}` entries
    pub credentials_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Bind address (default: 127.0.0.1)
    /// - `SERVERPORT` - HTTP server port (default: 3000)
    /// - `AUTH_CREDENTIALS_FILE` - Credential table path (default: built-in table)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_host: parse_or_default(
                "SERVER_HOST",
                env::var("SERVER_HOST").ok(),
                defaults.server_host,
            ),
            server_port: parse_or_default(
                "SERVERPORT",
                env::var("SERVERPORT").ok(),
                defaults.server_port,
            ),
            credentials_file: env::var("AUTH_CREDENTIALS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }

    /// Loads the configured credential table, falling back to the built-in one.
    pub fn load_credentials(&self) -> anyhow::Result<StaticCredentials> {
        match &self.credentials_file {
            Some(path) => {
                let creds = StaticCredentials::from_json_file(path)?;
                info!(
                    "Loaded {} credentials from {}",
                    creds.len(),
                    path.display()
                );
                Ok(creds)
            }
            None => {
                info!("No AUTH_CREDENTIALS_FILE set, using built-in credential table");
                Ok(StaticCredentials::builtin())
            }
        }
    }
}

/// Parses a variable's raw value, warning and keeping `default` when it is
/// set but unparseable.
fn parse_or_default<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(err) => {
            warn!("Ignoring invalid {}={:?} ({}), using {}", name, raw, err, default);
            default
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            server_port: 3000,
            credentials_file: None,
        }
    }
}
