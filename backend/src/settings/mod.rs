//! Application settings loaded via OrthoConfig.
//!
//! Values are merged from CLI flags, `CARLOT_*` environment variables and
//! configuration files. Fields left unset everywhere take the defaults below;
//! only the API key may stay absent.

mod api_key;

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

pub use api_key::{ApiKey, key_fingerprint};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE_URL: &str = "data/carlot.db";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Deployment environment.
///
/// Development seeds sample data; every environment other than production
/// exposes diagnostic details on internal errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Lower-case name, as reported by the welcome and health endpoints.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    /// True for the development environment.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// True when internal error details may be returned to clients.
    pub fn exposes_diagnostics(self) -> bool {
        !matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The environment name is not recognised.
    #[error("unknown environment {value:?}; expected development, test or production")]
    UnknownEnvironment { value: String },
    /// Host and port do not form a socket address.
    #[error("invalid bind address {value:?}")]
    InvalidBindAddress { value: String },
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(SettingsError::UnknownEnvironment {
                value: value.to_owned(),
            }),
        }
    }
}

/// Configuration values for the HTTP server and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARLOT")]
pub struct AppSettings {
    /// TCP port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Interface to bind.
    #[ortho_config(default = DEFAULT_HOST.to_owned())]
    pub host: String,
    /// Path of the SQLite database file.
    #[ortho_config(default = DEFAULT_DATABASE_URL.to_owned())]
    pub database_url: String,
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: Option<String>,
    /// Deployment environment name.
    #[ortho_config(default = DEFAULT_ENVIRONMENT.to_owned())]
    pub environment: String,
}

impl AppSettings {
    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Configured database path.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Socket address assembled from host and port.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddress`] when the host is not an
    /// IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = format!("{}:{}", self.host(), self.port());
        value
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddress { value })
    }

    /// Parsed environment name.
    ///
    /// # Errors
    /// Returns [`SettingsError::UnknownEnvironment`] for unrecognised names.
    pub fn environment(&self) -> Result<Environment, SettingsError> {
        self.environment.parse()
    }

    /// The configured API key, or `None` when key protection is disabled.
    ///
    /// Blank values count as unset.
    pub fn api_key(&self) -> Option<ApiKey> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(ApiKey::new)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "CARLOT_PORT",
        "CARLOT_HOST",
        "CARLOT_DATABASE_URL",
        "CARLOT_API_KEY",
        "CARLOT_ENVIRONMENT",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("carlot")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), 3000);
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.database_url(), "data/carlot.db");
        assert_eq!(settings.environment(), Ok(Environment::Development));
        assert!(settings.api_key().is_none());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:3000".parse::<SocketAddr>().expect("literal address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CARLOT_PORT", Some("8081".to_owned())),
            ("CARLOT_HOST", Some("127.0.0.1".to_owned())),
            ("CARLOT_DATABASE_URL", Some("/tmp/cars.db".to_owned())),
            ("CARLOT_API_KEY", Some("s3cret".to_owned())),
            ("CARLOT_ENVIRONMENT", Some("production".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), 8081);
        assert_eq!(settings.database_url(), "/tmp/cars.db");
        assert_eq!(settings.environment(), Ok(Environment::Production));
        assert!(settings.api_key().expect("key").matches("s3cret"));
    }

    #[rstest]
    fn blank_api_key_disables_protection() {
        let _guard = lock_env([("CARLOT_API_KEY", Some("   ".to_owned()))]);

        assert!(load_from_empty_args().api_key().is_none());
    }

    #[rstest]
    #[case("development", Environment::Development)]
    #[case("DEV", Environment::Development)]
    #[case("test", Environment::Test)]
    #[case(" prod ", Environment::Production)]
    fn environment_names_parse(#[case] raw: &str, #[case] expected: Environment) {
        assert_eq!(raw.parse::<Environment>(), Ok(expected));
    }

    #[rstest]
    fn unknown_environment_is_rejected() {
        let error = "staging".parse::<Environment>().expect_err("unknown name");
        assert!(error.to_string().contains("staging"));
    }

    #[rstest]
    #[case(Environment::Development, true, true)]
    #[case(Environment::Test, false, true)]
    #[case(Environment::Production, false, false)]
    fn environment_flags(
        #[case] environment: Environment,
        #[case] development: bool,
        #[case] diagnostics: bool,
    ) {
        assert_eq!(environment.is_development(), development);
        assert_eq!(environment.exposes_diagnostics(), diagnostics);
    }

    #[rstest]
    fn hostname_is_not_a_bind_address() {
        let settings = AppSettings {
            port: DEFAULT_PORT,
            host: "localhost".to_owned(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            api_key: None,
            environment: DEFAULT_ENVIRONMENT.to_owned(),
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddress { .. })
        ));
    }
}
