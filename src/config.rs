//! Configuration management for the maintenance server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    /// Lifetime of a password reset token
    #[serde(default = "default_reset_token_minutes")]
    pub reset_token_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Origin of the single-page app
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Load the demo dataset on startup
    pub seed_demo_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables, e.g. MAINT__SERVER__PORT
            .add_source(environment())
            // Override JWT secret from JWT_SECRET env var if present
            .set_override_option(
                "auth.jwt_secret",
                env::var("JWT_SECRET").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

/// `MAINT__<SECTION>__<KEY>` variables, e.g. `MAINT__AUTH__JWT_EXPIRATION_HOURS`
fn environment() -> Environment {
    Environment::with_prefix("MAINT")
        .separator("__")
        .try_parsing(true)
}

fn default_reset_token_minutes() -> i64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-secret-in-production".to_string(),
            jwt_expiration_hours: 24,
            reset_token_minutes: default_reset_token_minutes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed_demo_data: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        Config::builder()
            .add_source(environment().source(Some(map)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_environment_variables_use_double_underscore() {
        let config = from_vars(&[
            ("MAINT__SERVER__PORT", "8080"),
            ("MAINT__AUTH__JWT_EXPIRATION_HOURS", "12"),
        ]);
        assert_eq!(config.get::<u16>("server.port").unwrap(), 8080);
        assert_eq!(config.get::<u64>("auth.jwt_expiration_hours").unwrap(), 12);
    }

    #[test]
    fn test_single_underscore_variables_are_ignored() {
        let config = from_vars(&[("MAINT_SERVER_PORT", "8080")]);
        assert!(config.get::<u16>("server.port").is_err());
    }
}
