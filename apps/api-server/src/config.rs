//! Server configuration, read once at startup.

use std::env;

use postdesk_infra::{DatabaseConfig, JwtConfig};

use crate::telemetry::TelemetryConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on in-memory repositories.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}
