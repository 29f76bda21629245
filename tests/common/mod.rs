//! Common test utilities for wave2text integration tests
//!
//! Provides a temp-dir backed configuration, scripted terminal input and helpers
//! for reading back the files a session writes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use wave2text::config::EnvSource;
use wave2text::{AppConfig, AppConfigBuilder, Prompter, Session, Settings, save_settings};

pub type ScriptedSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

// =============================================================================
// Environment
// =============================================================================

/// Env source backed by a map, so tests never touch the process environment
#[derive(Default)]
pub struct MapEnv(pub HashMap<String, String>);

impl MapEnv {
    pub fn with(vars: &[(&str, &str)]) -> Self {
        Self(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        self.0.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Temporary config directory plus the matching AppConfig
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub config: AppConfig,
}

impl TestFixture {
    /// Empty config directory, env overrides disabled
    pub fn new() -> Self {
        Self::with_config(|builder| builder.without_env())
    }

    /// Empty config directory reading env overrides from `env`
    pub fn with_env(env: MapEnv) -> Self {
        Self::with_config(|builder| builder.env_source(Arc::new(env)))
    }

    /// Empty config directory with extra builder options applied
    pub fn with_config(configure: impl FnOnce(AppConfigBuilder) -> AppConfigBuilder) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = configure(AppConfig::builder().config_dir(temp_dir.path())).build();

        Self { temp_dir, config }
    }

    /// Fixture with a settings file and a pulse file already written
    pub fn with_files(settings: &Settings, pulse: &str) -> Self {
        let fixture = Self::new();
        fixture.write_settings(settings);
        fixture.write_pulse(&settings.pulse_path, pulse);
        fixture
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config.settings_path()
    }

    pub fn saved_dir(&self) -> PathBuf {
        self.config.saved_dir.clone()
    }

    pub fn write_settings(&self, settings: &Settings) {
        save_settings(self.settings_path(), settings).expect("Failed to write settings");
    }

    pub fn write_pulse(&self, name: &str, content: &str) {
        std::fs::write(self.config_dir().join(name), content).expect("Failed to write pulse");
    }

    /// Open a session that reads `script` as its terminal input
    pub fn session(&self, script: &str) -> ScriptedSession {
        let prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        Session::open(self.config.clone(), prompter).expect("Failed to open session")
    }

    /// Open a session, run it to completion and return it
    pub fn run(&self, script: &str) -> ScriptedSession {
        let mut session = self.session(script);
        session.run().expect("Session failed");
        session
    }

    pub fn read_saved(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.saved_dir().join(file_name))
            .unwrap_or_else(|e| panic!("Failed to read {file_name}: {e}"))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Everything the session printed
pub fn output(session: ScriptedSession) -> String {
    String::from_utf8(session.into_prompter().into_parts().1).expect("Output was not UTF-8")
}

/// Settings with a small sampling rate so expected waveforms stay readable
pub fn small_settings() -> Settings {
    Settings {
        pulse_path: "pulse.txt".into(),
        sample_rate_hz: 10.0,
        filler: 0.0,
        presets: Vec::new(),
    }
}
