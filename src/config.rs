use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::constants::http::{DEFAULT_DEV_BASE_URL, DEFAULT_PROD_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{DashboardError, DashboardResult};

pub const ENV_VAR_ENVIRONMENT: &str = "DASHBOARD_ENV";
pub const ENV_VAR_BASE_URL: &str = "DASHBOARD_API_BASE_URL";

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(DashboardError::Config(format!(
                "Unknown environment '{}' (expected development|production)",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_dev_base_url")]
    pub development_base_url: String,
    #[serde(default = "default_prod_base_url")]
    pub production_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            development_base_url: default_dev_base_url(),
            production_base_url: default_prod_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default)]
    pub auto_predict: bool,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api: ApiConfig::default(),
            default_symbol: default_symbol(),
            auto_predict: false,
            log_filter: default_log_filter(),
            event_bus_capacity: default_event_bus_capacity(),
        }
    }
}

fn default_dev_base_url() -> String {
    DEFAULT_DEV_BASE_URL.to_string()
}

fn default_prod_base_url() -> String {
    DEFAULT_PROD_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_symbol() -> String {
    "TSLA".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_event_bus_capacity() -> usize {
    64
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> DashboardResult<Self> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        serde_yaml::from_str(content)
            .map_err(|e| DashboardError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `DASHBOARD_ENV` / `DASHBOARD_API_BASE_URL` from the process environment.
    pub fn apply_env_overrides(self) -> DashboardResult<Self> {
        let environment = std::env::var(ENV_VAR_ENVIRONMENT).ok();
        let base_url = std::env::var(ENV_VAR_BASE_URL).ok();
        self.with_overrides(environment.as_deref(), base_url.as_deref())
    }

    /// Override the environment and/or the base URL of the selected environment.
    pub fn with_overrides(
        mut self,
        environment: Option<&str>,
        base_url: Option<&str>,
    ) -> DashboardResult<Self> {
        if let Some(env) = environment.filter(|s| !s.trim().is_empty()) {
            self.environment = env.parse()?;
        }
        if let Some(url) = base_url.filter(|s| !s.trim().is_empty()) {
            let url = url.trim().to_string();
            match self.environment {
                Environment::Development => self.api.development_base_url = url,
                Environment::Production => self.api.production_base_url = url,
            }
        }
        Ok(self)
    }

    pub fn selected_base_url(&self) -> &str {
        match self.environment {
            Environment::Development => &self.api.development_base_url,
            Environment::Production => &self.api.production_base_url,
        }
    }

    /// The validated API base URL for the selected environment.
    pub fn api_base_url(&self) -> DashboardResult<Url> {
        let raw = self.selected_base_url();
        let url = Url::parse(raw)
            .map_err(|e| DashboardError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(DashboardError::Config(format!(
                "API base URL '{}' cannot carry a path",
                raw
            )));
        }
        Ok(url)
    }
}
