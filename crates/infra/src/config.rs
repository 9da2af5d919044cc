use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub smtp: SmtpConfig,
    /// `EmailLog` entries older than this many days are removed by the
    /// retention sweep
    pub log_retention_days: i64,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address put on every outgoing email
    pub from_address: String,
}

impl Config {
    pub fn new() -> Self {
        let host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => {
                info!("Did not find SMTP_HOST environment variable. Falling back to localhost.");
                "localhost".into()
            }
        };
        let default_port = "587";
        let port = std::env::var("SMTP_PORT").unwrap_or(default_port.into());
        let port = match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given SMTP_PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<u16>().unwrap()
            }
        };
        let username = std::env::var("SMTP_USERNAME").ok();
        let password = std::env::var("SMTP_PASSWORD").ok();
        let from_address =
            std::env::var("EMAIL_FROM").unwrap_or_else(|_| "no-reply@example.com".into());

        let default_retention = "30";
        let log_retention_days = std::env::var("LOG_RETENTION_DAYS").unwrap_or(default_retention.into());
        let log_retention_days = match log_retention_days.parse::<i64>() {
            Ok(days) if days > 0 => days,
            _ => {
                warn!(
                    "The given LOG_RETENTION_DAYS: {} is not valid, falling back to the default: {}.",
                    log_retention_days, default_retention
                );
                default_retention.parse::<i64>().unwrap()
            }
        };

        Self {
            smtp: SmtpConfig {
                host,
                port,
                username,
                password,
                from_address,
            },
            log_retention_days,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
