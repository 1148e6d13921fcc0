//! Layered configuration loader and typed settings.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys in the environment are separated by `__`, so
//! `APP_API__BASE_URL` overrides `api.base_url`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            other => tracing::debug!(env = other, "no environment overlay for unknown RUST_ENV"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Ok(Self { figment })
    }

    pub fn from_figment(figment: Figment) -> Self { Self { figment } }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Extract the typed settings, filling gaps with defaults, and validate them.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub search: SearchSettings,
    pub session: SessionSettings,
    pub returns: ReturnSettings,
    pub tables: TableSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub auth_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self { base_url: "http://localhost:8000".to_string(), timeout_secs: 30, auth_token: None }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub limit: u32,
    pub page: u32,
    pub results_path: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { limit: 20, page: 1, results_path: "/shop/search-results".to_string() }
    }
}

/// Context the storefront holds outside any single flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    pub vehicle_type_id: Option<String>,
    /// Backend role name of the signed-in operator, e.g. `Inventory-Admin`.
    pub role: Option<String>,
}

/// Longest return window the storefront accepts.
pub const MAX_RETURN_WINDOW_DAYS: u32 = 365;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReturnSettings {
    pub window_days: u32,
}

impl Default for ReturnSettings {
    fn default() -> Self { Self { window_days: 7 } }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    pub page_size: usize,
}

impl Default for TableSettings {
    fn default() -> Self { Self { page_size: 10 } }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::InvalidConfig("api.timeout_secs must be positive".into()));
        }
        if self.search.limit == 0 || self.search.page == 0 {
            return Err(Error::InvalidConfig("search.limit and search.page must be positive".into()));
        }
        if !self.search.results_path.starts_with('/') {
            return Err(Error::InvalidConfig("search.results_path must start with '/'".into()));
        }
        if self.returns.window_days > MAX_RETURN_WINDOW_DAYS {
            return Err(Error::InvalidConfig(format!(
                "returns.window_days must be at most {MAX_RETURN_WINDOW_DAYS}"
            )));
        }
        if self.tables.page_size == 0 {
            return Err(Error::InvalidConfig("tables.page_size must be positive".into()));
        }
        Ok(())
    }
}
