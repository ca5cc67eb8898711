use crate::models::mess::MessSeed;
use crate::services::mess_calendar::{parse_tz_offset_or_default, DEFAULT_TZ_OFFSET};
use chrono::FixedOffset;
use dotenvy::var;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid mess menu file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: u32,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let database_url = var("DATABASE_URL").expect("DATABASE_URL must be set");
        let host = var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let pool_size = var("DB_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);
        Self {
            host,
            port,
            database_url,
            pool_size,
        }
    }
}

/// Bootstrap admin written to the `admins` table when it is missing.
#[derive(Clone)]
pub struct AdminSeedConfig {
    pub admin_id: Option<String>,
    pub password: Option<String>,
    pub pepper: String,
}

impl AdminSeedConfig {
    pub fn from_env() -> Self {
        let pepper =
            var("ADMIN_PASSWORD_PEPPER").expect("ADMIN_PASSWORD_PEPPER must be set");
        Self {
            admin_id: var("ADMIN_ID").ok().filter(|v| !v.trim().is_empty()),
            password: var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
            pepper,
        }
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.admin_id.as_deref()?.trim(), self.password.as_deref()?))
    }
}

#[derive(Clone, Debug)]
pub struct MessConfig {
    pub menu_path: String,
    pub tz: FixedOffset,
}

impl MessConfig {
    pub fn from_env() -> Self {
        let menu_path =
            var("MESS_MENU_PATH").unwrap_or_else(|_| "config/mess_menu.json".to_string());
        let tz = parse_tz_offset_or_default(
            &var("MESS_TZ_OFFSET").unwrap_or_else(|_| DEFAULT_TZ_OFFSET.to_string()),
        );
        Self { menu_path, tz }
    }

    pub fn load_seed(&self) -> Result<MessSeed, ConfigError> {
        let raw = std::fs::read_to_string(&self.menu_path).map_err(|source| ConfigError::Io {
            path: self.menu_path.clone(),
            source,
        })?;
        parse_seed(&raw).map_err(|source| ConfigError::Parse {
            path: self.menu_path.clone(),
            source,
        })
    }
}

pub fn parse_seed(raw: &str) -> Result<MessSeed, serde_json::Error> {
    serde_json::from_str(raw)
}
