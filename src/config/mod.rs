//! Configuration: the settings file, application paths and value constraints
//!
//! This module contains:
//! - `Settings` / `Preset` - The JSON settings file
//! - `AppConfig` - Where files live and how env overrides are read
//! - `NumberConstraints` / `TextConstraints` - Validation rules for user input

mod env;
mod schema;
mod settings;
mod types;

pub use env::{DefaultEnvSource, EnvSource, EnvironmentHandler};
pub use schema::{NumberConstraints, TextConstraints, fields};
pub use settings::{
    Preset, Settings, get_settings, read_settings, save_settings, write_settings,
};
pub use types::{AppConfig, AppConfigBuilder, DEFAULT_ENV_PREFIX};
