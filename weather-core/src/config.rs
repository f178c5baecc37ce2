use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::{Path, PathBuf}};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

pub const ENV_BASE_URL: &str = "WEATHERAPI_BASE_URL";
pub const ENV_API_KEY: &str = "WEATHERAPI_API_KEY";
pub const ENV_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";
pub const ENV_HOST: &str = "WEATHER_SERVER_HOST";
pub const ENV_PORT: &str = "WEATHER_SERVER_PORT";

/// Upstream provider settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), api_key: None }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The single origin allowed to call the API cross-origin. `None` disables CORS.
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, allowed_origin: None }
    }
}

/// Process-wide configuration, built once at startup and read-only afterwards.
///
/// Example TOML:
/// ```toml
/// [provider]
/// base_url = "https://api.weatherapi.com/v1"
/// api_key = "..."
///
/// [server]
/// port = 8080
/// allowed_origin = "http://localhost:5173"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load the config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(cfg)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Override fields from variables resolved by `lookup`. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(base_url) = var(ENV_BASE_URL) {
            self.provider.base_url = base_url;
        }
        if let Some(api_key) = var(ENV_API_KEY) {
            self.provider.api_key = Some(api_key);
        }
        if let Some(origin) = var(ENV_ALLOWED_ORIGIN) {
            self.server.allowed_origin = Some(origin);
        }
        if let Some(host) = var(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = var(ENV_PORT) {
            self.server.port = port
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
        }

        Ok(())
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The WeatherAPI.com key; required before any lookup can run.
    pub fn api_key(&self) -> Result<&str> {
        self.provider.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No WeatherAPI.com API key configured.\n\
                 Hint: run `weather-server configure` or set {ENV_API_KEY}."
            )
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(cfg: &mut Config, pairs: &[(&str, &str)]) -> Result<()> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        cfg.apply_overrides(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_point_at_weatherapi() {
        let cfg = Config::default();
        assert_eq!(cfg.provider.base_url, DEFAULT_BASE_URL);
        assert!(cfg.provider.api_key.is_none());
        assert!(cfg.server.allowed_origin.is_none());
        assert_eq!(cfg.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn api_key_errors_when_not_set() {
        let err = Config::default().api_key().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No WeatherAPI.com API key configured"));
        assert!(msg.contains("weather-server configure"));
    }

    #[test]
    fn env_overrides_everything() {
        let mut cfg = Config::default();
        apply(
            &mut cfg,
            &[
                (ENV_BASE_URL, "http://localhost:9000/v1"),
                (ENV_API_KEY, "ENV_KEY"),
                (ENV_ALLOWED_ORIGIN, "http://localhost:5173"),
                (ENV_HOST, "0.0.0.0"),
                (ENV_PORT, "3000"),
            ],
        )
        .unwrap();

        assert_eq!(cfg.provider.base_url, "http://localhost:9000/v1");
        assert_eq!(cfg.api_key().unwrap(), "ENV_KEY");
        assert_eq!(cfg.server.allowed_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(cfg.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.provider.api_key = Some("FILE_KEY".into());
        apply(&mut cfg, &[(ENV_API_KEY, "  "), (ENV_BASE_URL, "")]).unwrap();

        assert_eq!(cfg.api_key().unwrap(), "FILE_KEY");
        assert_eq!(cfg.provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut cfg = Config::default();
        let err = apply(&mut cfg, &[(ENV_PORT, "eighty")]).unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.provider.api_key = Some("SAVED".into());
        cfg.server.allowed_origin = Some("https://weather.example".into());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key().unwrap(), "SAVED");
        assert_eq!(loaded.server.allowed_origin.as_deref(), Some("https://weather.example"));
        assert_eq!(loaded.server.port, 8080);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\napi_key = \"K\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api_key().unwrap(), "K");
        assert_eq!(cfg.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn debug_hides_api_key() {
        let mut cfg = Config::default();
        cfg.provider.api_key = Some("SECRET".into());
        assert!(!format!("{cfg:?}").contains("SECRET"));
    }
}
