use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Connections held by the store (default: 1, one shared connection)
    pub max_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/city_explorer.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

/// Connection settings for one upstream API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub base_url: String,
}

impl ProviderConfig {
    fn with_base_url(base_url: &str) -> Self {
        Self {
            api_key: None,
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,

    pub geocode: ProviderConfig,

    pub weather: ProviderConfig,

    pub yelp: ProviderConfig,

    pub movies: ProviderConfig,

    pub meetups: ProviderConfig,

    pub trails: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            geocode: ProviderConfig::with_base_url(
                "https://maps.googleapis.com/maps/api/geocode/json",
            ),
            weather: ProviderConfig::with_base_url("https://api.darksky.net/forecast"),
            yelp: ProviderConfig::with_base_url("https://api.yelp.com/v3/businesses/search"),
            movies: ProviderConfig::with_base_url("https://api.themoviedb.org/3/search/movie"),
            meetups: ProviderConfig::with_base_url("https://api.meetup.com/find/upcoming_events"),
            trails: ProviderConfig::with_base_url("https://www.hikingproject.com/data/get-trails"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Load `explicit` or the first config file found, then apply
    /// environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load_file()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Environment names follow the deployment's `.env` file.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("DATABASE_URL") {
            self.general.database_url = url;
        }

        if let Some(port) = var("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        let keys = [
            ("GOOGLE_API_KEY", &mut self.providers.geocode),
            ("DARK_SKY_API_KEY", &mut self.providers.weather),
            ("YELP_API_KEY", &mut self.providers.yelp),
            ("MOVIEDB_API_KEY", &mut self.providers.movies),
            ("MEETUP_API_KEY", &mut self.providers.meetups),
            ("TRAIL_API_KEY", &mut self.providers.trails),
        ];

        for (name, provider) in keys {
            if let Some(key) = var(name).filter(|k| !k.is_empty()) {
                provider.api_key = Some(key);
            }
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("city-explorer").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".city-explorer").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.general.max_db_connections == 0 {
            anyhow::bail!("max_db_connections must be at least 1");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0");
        }

        Ok(())
    }

    /// Providers that will fail every request for lack of a key.
    #[must_use]
    pub fn providers_missing_keys(&self) -> Vec<&'static str> {
        let p = &self.providers;
        [
            ("geocode", &p.geocode),
            ("weather", &p.weather),
            ("yelp", &p.yelp),
            ("movies", &p.movies),
            ("meetups", &p.meetups),
            ("trails", &p.trails),
        ]
        .into_iter()
        .filter(|(_, cfg)| cfg.api_key.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.general.max_db_connections, 1);
        assert_eq!(config.providers.request_timeout_seconds, 30);
        assert!(config.providers.yelp.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[providers.weather]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [providers.yelp]
            api_key = "yelp-secret"
            base_url = "http://localhost:9999/search"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.providers.yelp.api_key.as_deref(), Some("yelp-secret"));
        assert_eq!(config.providers.yelp.base_url, "http://localhost:9999/search");

        assert_eq!(
            config.providers.weather.base_url,
            "https://api.darksky.net/forecast"
        );
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "8080"),
            ("DARK_SKY_API_KEY", "sky"),
            ("TRAIL_API_KEY", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(ToString::to_string));

        assert_eq!(config.general.database_url, "sqlite::memory:");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.providers.weather.api_key.as_deref(), Some("sky"));
        assert!(config.providers.trails.api_key.is_none());
        assert!(config.providers_missing_keys().contains(&"trails"));
        assert!(!config.providers_missing_keys().contains(&"weather"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.providers.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
