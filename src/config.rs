//! Runtime configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TASKDESK_DATABASE_URL` | `taskdesk.db` |
//! | `TASKDESK_DATABASE_MAX_CONNECTIONS` | `4` |
//! | `TASKDESK_SMTP_HOST` | unset, which disables email |
//! | `TASKDESK_SMTP_PORT` | `587` |
//! | `TASKDESK_SMTP_USERNAME` | required with a host |
//! | `TASKDESK_SMTP_PASSWORD` | required with a host |
//! | `TASKDESK_SMTP_FROM` | the username |
//! | `TASKDESK_SMTP_TIMEOUT_SECS` | unset, no timeout |

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Database path used when none is configured.
pub const DEFAULT_DATABASE_URL: &str = "taskdesk.db";
/// Pool size used when none is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;
/// SMTP submission port used when none is configured.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("{name} has an invalid value '{value}'")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
    /// A variable required by another one is missing.
    #[error("{name} is required when {required_by} is set")]
    Missing {
        /// Missing variable.
        name: &'static str,
        /// Variable that requires it.
        required_by: &'static str,
    },
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Mail submission settings, when email is enabled.
    pub smtp: Option<SmtpConfig>,
}

/// `SQLite` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database file path, or `:memory:`.
    pub url: String,
    /// Pool size.
    pub max_connections: u32,
}

/// SMTP submission settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// Relay host, reached over STARTTLS.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Sender address.
    pub from: String,
    /// Optional per-message timeout.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparsable values or incomplete SMTP
    /// settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparsable values or incomplete SMTP
    /// settings.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database = DatabaseConfig {
            url: read("TASKDESK_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            max_connections: parse_or(
                "TASKDESK_DATABASE_MAX_CONNECTIONS",
                read("TASKDESK_DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
        };

        let smtp = match read("TASKDESK_SMTP_HOST") {
            None => None,
            Some(host) => {
                let required = |name: &'static str| {
                    read(name).ok_or(ConfigError::Missing {
                        name,
                        required_by: "TASKDESK_SMTP_HOST",
                    })
                };
                let username = required("TASKDESK_SMTP_USERNAME")?;
                let password = required("TASKDESK_SMTP_PASSWORD")?;
                let timeout = read("TASKDESK_SMTP_TIMEOUT_SECS")
                    .map(|raw| parse("TASKDESK_SMTP_TIMEOUT_SECS", raw))
                    .transpose()?
                    .map(Duration::from_secs);
                Some(SmtpConfig {
                    host: host.trim().to_owned(),
                    port: parse_or(
                        "TASKDESK_SMTP_PORT",
                        read("TASKDESK_SMTP_PORT"),
                        DEFAULT_SMTP_PORT,
                    )?,
                    from: read("TASKDESK_SMTP_FROM").unwrap_or_else(|| username.clone()),
                    username,
                    password,
                    timeout,
                })
            }
        };

        Ok(Self { database, smtp })
    }
}

fn parse<T: FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    raw.map_or(Ok(default), |value| parse(name, value))
}
