use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub feeds: FeedsConfig,
    pub filter: FilterConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Locations of the two calendar feeds.
///
/// A feed source is either an `http`/`https` URL or a filesystem path.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    /// The calendar filtered against (e.g. a personal calendar).
    pub primary: String,
    /// The calendar that gets filtered (e.g. a published work calendar).
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Events whose SUMMARY contains any of these phrases are removed.
    /// Matching is case-sensitive literal substring containment.
    pub phrases: Vec<String>,
    /// Minimum partial-ratio title score (0-100) for two events to be
    /// considered the same event name.
    pub fuzzy_threshold: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret required as the `key` query parameter.
    pub shared_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8653)?
            .set_default("filter.phrases", Vec::<String>::new())?
            .set_default("filter.fuzzy_threshold", 90)?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks cross-field constraints the deserializer cannot express.
    ///
    /// ## Errors
    /// Returns an error if the fuzzy threshold exceeds 100 (scores are
    /// 0-100, so a larger threshold would silently disable matching).
    pub fn validate(&self) -> CoreResult<()> {
        if self.filter.fuzzy_threshold > 100 {
            return Err(CoreError::InvalidConfiguration(format!(
                "filter.fuzzy_threshold must be 0-100, got {}",
                self.filter.fuzzy_threshold
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(threshold: u8) -> Settings {
        Settings {
            feeds: FeedsConfig {
                primary: "https://example.com/a.ics".to_string(),
                target: "https://example.com/b.ics".to_string(),
            },
            filter: FilterConfig {
                phrases: Vec::new(),
                fuzzy_threshold: threshold,
            },
            auth: AuthConfig {
                shared_secret: "secret".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8653,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }

    #[test]
    fn threshold_within_range_is_valid() {
        assert!(settings(0).validate().is_ok());
        assert!(settings(90).validate().is_ok());
        assert!(settings(100).validate().is_ok());
    }

    #[test]
    fn threshold_above_100_is_rejected() {
        assert!(settings(101).validate().is_err());
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        assert_eq!(settings(90).server.bind_addr(), "127.0.0.1:8653");
    }
}
