//! Server configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;
pub const DEFAULT_ORDER_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bind address (env: HOST)
    pub host: IpAddr,
    /// HTTP and WebSocket port (env: PORT)
    pub port: u16,
    /// JSON menu replacing the built-in one (env: MENU_PATH)
    pub menu_path: Option<PathBuf>,
    /// Events buffered per subscriber before it lags (env: BROADCAST_CAPACITY)
    pub broadcast_capacity: usize,
    /// Pending requests to the order actor (env: ORDER_CHANNEL_CAPACITY)
    pub order_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            menu_path: None,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            order_channel_capacity: DEFAULT_ORDER_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source. Unset or empty variables take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: parse_or("HOST", var("HOST"), defaults.host)?,
            port: parse_or("PORT", var("PORT"), defaults.port)?,
            menu_path: var("MENU_PATH").map(PathBuf::from),
            broadcast_capacity: positive_or(
                "BROADCAST_CAPACITY",
                var("BROADCAST_CAPACITY"),
                defaults.broadcast_capacity,
            )?,
            order_channel_capacity: positive_or(
                "ORDER_CHANNEL_CAPACITY",
                var("ORDER_CHANNEL_CAPACITY"),
                defaults.order_channel_capacity,
            )?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
    }
}

// Channel constructors panic on zero.
fn positive_or(
    var: &'static str,
    value: Option<String>,
    default: usize,
) -> Result<usize, ConfigError> {
    let parsed = parse_or(var, value, default)?;
    if parsed == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: "0".into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(parsed)
}
