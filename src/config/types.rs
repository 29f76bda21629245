//! Application paths and environment configuration

use std::path::PathBuf;
use std::sync::Arc;

use super::env::{DefaultEnvSource, EnvSource, EnvironmentHandler};
use crate::storage::JsonStorage;

/// Default environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "WAVE2TEXT";

/// Configuration for a wave2text session: where files live and how env overrides work
#[derive(Clone)]
pub struct AppConfig {
    /// Directory holding the settings file; relative pulse paths resolve against it
    pub config_dir: PathBuf,

    /// Filename for the settings file (e.g., "settings.json")
    pub settings_file: String,

    /// Directory exported waveforms are written to
    pub saved_dir: PathBuf,

    /// Storage backend for the settings file
    pub storage: JsonStorage,

    /// Sampling rate for this run; wins over the environment and the settings file
    pub sample_rate_hz: Option<f64>,

    /// Environment variable prefix for setting overrides (e.g., "WAVE2TEXT" -> WAVE2TEXT_FILLER)
    /// If None, env var overrides are disabled
    pub env_prefix: Option<String>,

    /// Where env overrides are read from
    pub env_source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("config_dir", &self.config_dir)
            .field("settings_file", &self.settings_file)
            .field("saved_dir", &self.saved_dir)
            .field("storage", &self.storage)
            .field("sample_rate_hz", &self.sample_rate_hz)
            .field("env_prefix", &self.env_prefix)
            .finish_non_exhaustive()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfigBuilder::new().build()
    }
}

impl AppConfig {
    /// Create a new builder for AppConfig
    ///
    /// # Example
    /// ```rust
    /// use wave2text::AppConfig;
    ///
    /// let config = AppConfig::builder()
    ///     .config_dir("/tmp/wave2text")
    ///     .build();
    /// assert!(config.settings_path().ends_with("settings.json"));
    /// assert!(config.saved_dir.ends_with("saved"));
    /// ```
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// Get the full path to the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(&self.settings_file)
    }

    /// Environment handler built from the prefix and source
    pub fn env_handler(&self) -> EnvironmentHandler {
        EnvironmentHandler::new(self.env_prefix.clone(), self.env_source.clone())
    }
}

/// Builder for creating AppConfig with a fluent API
#[derive(Clone)]
pub struct AppConfigBuilder {
    config_dir: Option<PathBuf>,
    settings_file: String,
    saved_dir: Option<PathBuf>,
    sample_rate_hz: Option<f64>,
    env_prefix: Option<String>,
    env_source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for AppConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfigBuilder")
            .field("config_dir", &self.config_dir)
            .field("settings_file", &self.settings_file)
            .field("saved_dir", &self.saved_dir)
            .field("sample_rate_hz", &self.sample_rate_hz)
            .field("env_prefix", &self.env_prefix)
            .finish_non_exhaustive()
    }
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(&path));
        }
    }
    path
}

impl AppConfigBuilder {
    /// Create a builder with defaults: current directory, `settings.json`,
    /// `saved/` under the config dir, and the `WAVE2TEXT` env prefix.
    pub fn new() -> Self {
        Self {
            config_dir: None,
            settings_file: "settings.json".into(),
            saved_dir: None,
            sample_rate_hz: None,
            env_prefix: Some(DEFAULT_ENV_PREFIX.into()),
            env_source: Arc::new(DefaultEnvSource),
        }
    }

    /// Set the configuration directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(expand_home(path.into()));
        self
    }

    /// Set the settings filename (default: "settings.json")
    pub fn settings_file(mut self, filename: impl Into<String>) -> Self {
        self.settings_file = filename.into();
        self
    }

    /// Set the export directory (default: `saved` under the config dir)
    ///
    /// Supports `~` expansion for home directory.
    pub fn saved_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.saved_dir = Some(expand_home(path.into()));
        self
    }

    /// Override the sampling rate for this run only
    ///
    /// Takes precedence over `{PREFIX}_SAMPLE_RATE_HZ` and the settings file, and
    /// is never written back unless the user saves a new rate.
    pub fn sample_rate_hz(mut self, rate: f64) -> Self {
        self.sample_rate_hz = Some(rate);
        self
    }

    /// Set the environment variable prefix
    ///
    /// # Example
    /// ```rust
    /// use wave2text::AppConfig;
    ///
    /// let config = AppConfig::builder().env_prefix("PULSES").build();
    ///
    /// // Now PULSES_SAMPLE_RATE_HZ=20000 overrides the sampling rate
    /// assert_eq!(
    ///     config.env_handler().get_env_var_name("sample_rate_hz").as_deref(),
    ///     Some("PULSES_SAMPLE_RATE_HZ")
    /// );
    /// ```
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Disable environment variable overrides
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Read env overrides from a custom source
    pub fn env_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.env_source = source;
        self
    }

    /// Build the AppConfig
    ///
    /// If `config_dir` is not set, the current directory is used.
    pub fn build(self) -> AppConfig {
        let config_dir = self.config_dir.unwrap_or_else(|| PathBuf::from("."));
        let saved_dir = self.saved_dir.unwrap_or_else(|| config_dir.join("saved"));

        AppConfig {
            config_dir,
            settings_file: self.settings_file,
            saved_dir,
            storage: JsonStorage::new(),
            sample_rate_hz: self.sample_rate_hz,
            env_prefix: self.env_prefix,
            env_source: self.env_source,
        }
    }
}
