//! Runtime configuration, read from `LEDGER_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::domain::calendar::BusinessCalendar;
use crate::domain::ledger_service::LedgerSettings;

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub database_url: String,
    pub http_addr: SocketAddr,
    pub cors_origin: String,
    /// Admin UI bundle served for non-API paths
    pub static_dir: Option<PathBuf>,
    pub mpesa_confirmation_delay: Duration,
    pub utc_offset_hours: i32,
    pub seed_sample_data: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:livestock_ledger.db".to_string(),
            http_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: "http://localhost:8080".to_string(),
            static_dir: None,
            mpesa_confirmation_delay: Duration::from_millis(3000),
            utc_offset_hours: 3,
            seed_sample_data: true,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let database_url = lookup("LEDGER_DATABASE_URL").unwrap_or(defaults.database_url);
        let http_addr = match lookup("LEDGER_HTTP_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("LEDGER_HTTP_ADDR is not a socket address: {}", addr))?,
            None => defaults.http_addr,
        };
        let cors_origin = lookup("LEDGER_CORS_ORIGIN").unwrap_or(defaults.cors_origin);
        let static_dir = lookup("LEDGER_STATIC_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let mpesa_confirmation_delay = match lookup("LEDGER_MPESA_CONFIRM_MS") {
            Some(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .with_context(|| format!("LEDGER_MPESA_CONFIRM_MS is not a number: {}", ms))?,
            ),
            None => defaults.mpesa_confirmation_delay,
        };
        let utc_offset_hours = match lookup("LEDGER_UTC_OFFSET_HOURS") {
            Some(hours) => hours
                .trim()
                .parse()
                .with_context(|| format!("LEDGER_UTC_OFFSET_HOURS is not a number: {}", hours))?,
            None => defaults.utc_offset_hours,
        };
        let seed_sample_data = match lookup("LEDGER_SEED_SAMPLE_DATA") {
            Some(flag) => parse_flag(&flag)
                .with_context(|| "LEDGER_SEED_SAMPLE_DATA must be true or false")?,
            None => defaults.seed_sample_data,
        };

        let config = Self {
            database_url,
            http_addr,
            cors_origin,
            static_dir,
            mpesa_confirmation_delay,
            utc_offset_hours,
            seed_sample_data,
        };
        config.calendar()?;
        Ok(config)
    }

    pub fn calendar(&self) -> Result<BusinessCalendar> {
        BusinessCalendar::from_hours(self.utc_offset_hours).ok_or_else(|| {
            anyhow!(
                "LEDGER_UTC_OFFSET_HOURS must be between -23 and 23, got {}",
                self.utc_offset_hours
            )
        })
    }

    pub fn ledger_settings(&self) -> Result<LedgerSettings> {
        Ok(LedgerSettings {
            calendar: self.calendar()?,
            confirmation_delay: self.mpesa_confirmation_delay,
            seed_sample_data: self.seed_sample_data,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("not a boolean: {}", other)),
    }
}
