use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("{0} is neither set nor available as a secret")]
    MissingSecret(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub smtp_host: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub recipient: String,
    pub mail_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let smtp_user = read_secret("GMAIL_USER")?;
        let smtp_pass = read_secret("GMAIL_PASS")?;

        let recipient = var("RECIPIENT_EMAIL").unwrap_or_else(|_| {
            info!("RECIPIENT_EMAIL not set, delivering to GMAIL_USER");
            smtp_user.clone()
        });

        Ok(Self {
            port: try_load("PORT", "3001")?,
            smtp_host: try_load("SMTP_HOST", "smtp.gmail.com")?,
            smtp_user,
            smtp_pass,
            recipient,
            mail_timeout: Duration::from_secs(try_load("MAIL_TIMEOUT_SECS", "10")?),
            static_dir: try_load("STATIC_DIR", "static")?,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

/// Environment first, then the docker secret mount.
fn read_secret(secret_name: &'static str) -> Result<String, ConfigError> {
    if let Ok(value) = var(secret_name) {
        return Ok(value);
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
            ConfigError::MissingSecret(secret_name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_used_when_unset() {
        let port: u16 = try_load("PORTFOLIO_TEST_UNSET_PORT", "3001").unwrap();

        assert_eq!(port, 3001);
    }

    #[test]
    fn test_bad_default_is_reported() {
        let result: Result<u16, _> = try_load("PORTFOLIO_TEST_UNSET_NUMBER", "not a number");

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "PORTFOLIO_TEST_UNSET_NUMBER",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_secret() {
        let result = read_secret("PORTFOLIO_TEST_MISSING_SECRET");

        assert!(matches!(
            result,
            Err(ConfigError::MissingSecret("PORTFOLIO_TEST_MISSING_SECRET"))
        ));
    }
}
