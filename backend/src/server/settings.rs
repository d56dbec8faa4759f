//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DELIVERY_*` environment variables, or a
//! configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::{
    DEFAULT_BRANCH_RADIUS_METERS, DEFAULT_COURIER_RADIUS_METERS, ProximityError, ProximityPolicy,
};
use backend::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid proximity radius: {0}")]
    Radius(#[from] ProximityError),
}

/// Runtime configuration for the delivery backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DELIVERY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Fixture adapters are wired when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Branch search radius in meters.
    pub branch_radius_meters: Option<f64>,
    /// Courier search radius in meters.
    pub courier_radius_meters: Option<f64>,
    /// Whether admins may assign couriers.
    #[ortho_config(default = true)]
    pub courier_assignment_enabled: bool,
    /// File holding at least 64 bytes of session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Accept the built-in `admin` and `customer` development accounts.
    /// Defaults to on in debug builds and off in release builds.
    pub fixture_login: Option<bool>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Radii with defaults applied; non-positive values are rejected.
    pub fn proximity_policy(&self) -> Result<ProximityPolicy, SettingsError> {
        Ok(ProximityPolicy::new(
            self.branch_radius_meters
                .unwrap_or(DEFAULT_BRANCH_RADIUS_METERS),
            self.courier_radius_meters
                .unwrap_or(DEFAULT_COURIER_RADIUS_METERS),
        )?)
    }

    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let config = PoolConfig::new(url);
        Some(match self.db_max_connections {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }

    pub fn fixture_login_enabled(&self) -> bool {
        self.fixture_login.unwrap_or(cfg!(debug_assertions))
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}
