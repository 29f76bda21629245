//! Environment variable handling for settings
//!
//! Helper types to encapsulate overriding settings via env vars.

use std::sync::Arc;

/// Source of environment variables
///
/// Lets tests inject variables without touching the process environment.
pub trait EnvSource: Send + Sync {
    /// Look up a variable by name
    fn var(&self, key: &str) -> Result<String, std::env::VarError>;
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// Handles environment variable lookups and parsing
#[derive(Clone)]
pub struct EnvironmentHandler {
    prefix: Option<String>,
    source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for EnvironmentHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentHandler")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl EnvironmentHandler {
    pub fn new(prefix: Option<String>, source: Arc<dyn EnvSource>) -> Self {
        Self { prefix, source }
    }

    /// Get the environment variable name for a setting key
    ///
    /// Returns None if env var overrides are disabled.
    /// Format: {PREFIX}_{KEY} (all uppercase)
    pub fn get_env_var_name(&self, key: &str) -> Option<String> {
        self.prefix.as_ref().map(|prefix| {
            let env_key = key.replace('.', "_").to_uppercase();
            format!("{}_{}", prefix.to_uppercase(), env_key)
        })
    }

    /// Raw string override for a setting key, if set
    pub fn get_env_override(&self, key: &str) -> Option<String> {
        let env_var_name = self.get_env_var_name(key)?;
        self.source.var(&env_var_name).ok()
    }

    /// Numeric override for a setting key
    ///
    /// `Some(Err(raw))` means the variable is set but does not parse.
    pub fn get_env_number(&self, key: &str) -> Option<Result<f64, String>> {
        self.get_env_override(key)
            .map(|raw| raw.trim().parse::<f64>().map_err(|_| raw))
    }
}
