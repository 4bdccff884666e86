//! Runtime configuration.
//!
//! Values come from the process environment. A `.env` file in the working
//! directory is loaded first when present; variables already set in the
//! environment win over it.
//!
//! | Variable | Default |
//! |---|---|
//! | `CONTACTS_HOST` | `0.0.0.0` |
//! | `CONTACTS_PORT` | `5000` |
//! | `DB_NAME` | `contacts_db` |
//! | `CONTACTS_STRICT_VALIDATION` | `false` |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Name of the database holding the contacts collection.
    pub db_name: String,
    /// Reject contact fields of the wrong JSON type.
    pub strict_validation: bool,
}

impl Config {
    /// The collection every handler reads and writes.
    pub const COLLECTION: &'static str = "contacts";

    /// Loads `.env` (if any), then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset or blank
    /// variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = match get("CONTACTS_HOST") {
            Some(raw) => raw.trim().parse().map_err(|e| invalid("CONTACTS_HOST", e))?,
            None => defaults.host,
        };
        let port = match get("CONTACTS_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| invalid("CONTACTS_PORT", e))?,
            None => defaults.port,
        };
        let strict_validation = match get("CONTACTS_STRICT_VALIDATION") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "CONTACTS_STRICT_VALIDATION",
                reason: format!("expected true or false, got `{raw}`"),
            })?,
            None => defaults.strict_validation,
        };

        Ok(Self {
            host,
            port,
            db_name: get("DB_NAME").unwrap_or(defaults.db_name),
            strict_validation,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            db_name: "contacts_db".to_owned(),
            strict_validation: false,
        }
    }
}

fn invalid(var: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue { var, reason: err.to_string() }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_listen_on_5000() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("CONTACTS_HOST", "127.0.0.1"),
            ("CONTACTS_PORT", "8080"),
            ("DB_NAME", "crm"),
            ("CONTACTS_STRICT_VALIDATION", "TRUE"),
        ])
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_name, "crm");
        assert!(config.strict_validation);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("CONTACTS_PORT", "  "), ("DB_NAME", "")]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_name, "contacts_db");
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = load(&[("CONTACTS_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for CONTACTS_PORT"));

        let err = load(&[("CONTACTS_STRICT_VALIDATION", "maybe")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for CONTACTS_STRICT_VALIDATION: expected true or false, got `maybe`"
        );
    }
}
