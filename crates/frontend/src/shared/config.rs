//! Client configuration.
//!
//! Defaults are embedded as TOML; `RAPID_API_BASE` set at build time
//! overrides the API base URL.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub list: ListConfig,
    pub toast: ToastConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Empty means "same host as the page, port 3000"
    #[serde(default)]
    pub base_url: String,
    /// Extra attempts for GET on transient failures
    pub get_retries: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    pub idle_timeout_minutes: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Width of the page-number window in pagination controls
    pub page_window: usize,
    /// Loading indicators stay up at least this long (0 disables)
    pub min_loading_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToastConfig {
    pub duration_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
get_retries = 1

[session]
idle_timeout_minutes = 10

[list]
default_page_size = 10
page_size_options = [10, 25, 50, 100]
page_window = 5
min_loading_ms = 1000

[toast]
duration_ms = 3000
"#;

static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let mut config = match AppConfig::parse(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // Unreachable with the embedded document; keep the app usable anyway
            log::error!("Embedded config is invalid: {}", e);
            AppConfig::fallback()
        }
    };
    if let Some(base) = option_env!("RAPID_API_BASE") {
        config.api.base_url = base.trim_end_matches('/').to_string();
    }
    config
});

impl AppConfig {
    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Loaded configuration (parsed once).
    pub fn get() -> &'static AppConfig {
        &CONFIG
    }

    fn fallback() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                get_retries: 1,
            },
            session: SessionConfig {
                idle_timeout_minutes: 10,
            },
            list: ListConfig {
                default_page_size: 10,
                page_size_options: vec![10, 25, 50, 100],
                page_window: 5,
                min_loading_ms: 1000,
            },
            toast: ToastConfig { duration_ms: 3000 },
        }
    }

    pub fn idle_timeout_ms(&self) -> f64 {
        f64::from(self.session.idle_timeout_minutes) * 60_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.get_retries, 1);
        assert_eq!(config.session.idle_timeout_minutes, 10);
        assert_eq!(config.list.page_window, 5);
        assert_eq!(config.list.min_loading_ms, 1000);
        assert_eq!(config.idle_timeout_ms(), 600_000.0);
    }

    #[test]
    fn test_fallback_matches_embedded_defaults() {
        assert_eq!(AppConfig::parse(DEFAULT_CONFIG).unwrap(), AppConfig::fallback());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(AppConfig::parse("[api]\nget_retries = 1").is_err());
    }
}
