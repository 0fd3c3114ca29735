use chrono::FixedOffset;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    /// Owner of the journal the service reports on.
    pub journal_user_id: i64,
    pub utc_offset_minutes: i32,

    pub insights_refresh_secs: u64,
    pub wellbeing_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        let config = Self {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 8080)?,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".into()),

            journal_user_id: parse_value("JOURNAL_USER_ID", &required("JOURNAL_USER_ID")?)?,
            utc_offset_minutes: parse_or(&lookup, "UTC_OFFSET_MINUTES", 0)?,

            insights_refresh_secs: parse_or(&lookup, "INSIGHTS_REFRESH_SECS", 300)?,
            // Companion polls the aggregate every 30 seconds
            wellbeing_refresh_secs: parse_or(&lookup, "WELLBEING_REFRESH_SECS", 30)?,
        };

        config.utc_offset()?;
        if config.insights_refresh_secs == 0 || config.wellbeing_refresh_secs == 0 {
            return Err(AppError::Config("refresh intervals must be positive".into()));
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn utc_offset(&self) -> AppResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "UTC_OFFSET_MINUTES out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }

    pub fn insights_interval(&self) -> Duration {
        Duration::from_secs(self.insights_refresh_secs)
    }

    pub fn wellbeing_interval(&self) -> Duration {
        Duration::from_secs(self.wellbeing_refresh_secs)
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{key} must be a number")))
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.is_empty() => parse_value(key, &raw),
        _ => Ok(default),
    }
}
