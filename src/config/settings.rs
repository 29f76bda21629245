//! The settings file: pulse shape location, sampling rate, filler and presets

use super::env::EnvironmentHandler;
use super::schema::fields;
use crate::error::{Error, Result};
use crate::storage::{JsonStorage, StorageBackend};
use crate::waveform::PulseTrain;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Preset
// =============================================================================

/// A stored pulse train.
///
/// Stored as a JSON array: `[frequency_hz, duration_s, filler]`, or
/// `[frequency_hz, duration_s]` to use the settings-level filler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PresetRepr", into = "PresetRepr")]
pub struct Preset {
    pub pulse_frequency_hz: f64,
    pub duration_sec: f64,
    /// None falls back to [`Settings::filler`]
    pub filler: Option<f64>,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum PresetRepr {
    Full(f64, f64, f64),
    Short(f64, f64),
}

impl From<PresetRepr> for Preset {
    fn from(repr: PresetRepr) -> Self {
        match repr {
            PresetRepr::Full(pulse_frequency_hz, duration_sec, filler) => Self {
                pulse_frequency_hz,
                duration_sec,
                filler: Some(filler),
            },
            PresetRepr::Short(pulse_frequency_hz, duration_sec) => Self {
                pulse_frequency_hz,
                duration_sec,
                filler: None,
            },
        }
    }
}

impl From<Preset> for PresetRepr {
    fn from(preset: Preset) -> Self {
        match preset.filler {
            Some(filler) => {
                PresetRepr::Full(preset.pulse_frequency_hz, preset.duration_sec, filler)
            }
            None => PresetRepr::Short(preset.pulse_frequency_hz, preset.duration_sec),
        }
    }
}

impl From<PulseTrain> for Preset {
    fn from(train: PulseTrain) -> Self {
        Self {
            pulse_frequency_hz: train.pulse_frequency_hz,
            duration_sec: train.duration_sec,
            filler: Some(train.filler),
        }
    }
}

impl Preset {
    /// Resolve into concrete parameters
    pub fn train(&self, default_filler: f64) -> PulseTrain {
        PulseTrain::new(
            self.pulse_frequency_hz,
            self.duration_sec,
            self.filler.unwrap_or(default_filler),
        )
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Format to store/read settings in JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pulse shape file; relative paths resolve against the config directory
    pub pulse_path: String,
    pub sample_rate_hz: f64,
    /// Filler for presets that do not carry their own
    pub filler: f64,
    #[serde(
        rename = "presets_phase_duration_filler",
        alias = "phase_duration_presets"
    )]
    pub presets: Vec<Preset>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pulse_path: "pulse.txt".into(),
            sample_rate_hz: 100000.0,
            filler: 0.0,
            presets: Vec::new(),
        }
    }
}

impl Settings {
    /// Check values loaded from disk
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSettingValue` for the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if self.pulse_path.trim().is_empty() {
            return Err(Error::InvalidSettingValue {
                key: fields::PULSE_PATH.into(),
                reason: "Path cannot be empty".into(),
            });
        }

        fields::sample_rate_hz()
            .validate(self.sample_rate_hz)
            .map_err(|reason| Error::InvalidSettingValue {
                key: fields::SAMPLE_RATE_HZ.into(),
                reason,
            })?;

        fields::filler()
            .validate(self.filler)
            .map_err(|reason| Error::InvalidSettingValue {
                key: fields::FILLER.into(),
                reason,
            })?;

        for (n, preset) in self.presets.iter().enumerate() {
            preset
                .train(self.filler)
                .validate()
                .map_err(|e| Error::InvalidSettingValue {
                    key: format!("presets[{n}]"),
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// Pulse file location, joined onto `config_dir` when relative
    pub fn resolve_pulse_path(&self, config_dir: &Path) -> PathBuf {
        let path = PathBuf::from(&self.pulse_path);
        if path.is_absolute() {
            path
        } else {
            config_dir.join(path)
        }
    }

    /// Apply `{PREFIX}_PULSE_PATH`, `{PREFIX}_SAMPLE_RATE_HZ` and `{PREFIX}_FILLER`.
    ///
    /// Unparseable or out-of-range values are logged and ignored.
    pub fn apply_env_overrides(&mut self, env: &EnvironmentHandler) {
        if let Some(path) = env.get_env_override(fields::PULSE_PATH) {
            if path.trim().is_empty() {
                warn!("Ignoring empty {} override", fields::PULSE_PATH);
            } else {
                info!("{} overridden by environment", fields::PULSE_PATH);
                self.pulse_path = path;
            }
        }

        let numeric = [
            (fields::SAMPLE_RATE_HZ, fields::sample_rate_hz(), &mut self.sample_rate_hz),
            (fields::FILLER, fields::filler(), &mut self.filler),
        ];
        for (key, constraints, slot) in numeric {
            match env.get_env_number(key) {
                Some(Ok(value)) => match constraints.validate(value) {
                    Ok(()) => {
                        info!("{key} overridden by environment");
                        *slot = value;
                    }
                    Err(reason) => warn!("Ignoring {key} override {value}: {reason}"),
                },
                Some(Err(raw)) => warn!("Ignoring {key} override '{raw}': not a number"),
                None => {}
            }
        }
    }

    /// Printable block describing these settings
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz, {} s, filler ", self.pulse_frequency_hz, self.duration_sec)?;
        match self.filler {
            Some(filler) => write!(f, "{filler}"),
            None => write!(f, "default"),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    Pulse shape file: {}", self.pulse_path)?;
        writeln!(f, "    Sampling rate:    {} Hz", self.sample_rate_hz)?;
        writeln!(f, "    Filler:           {}", self.filler)?;
        if self.presets.is_empty() {
            return writeln!(f, "    No presets");
        }
        writeln!(f, "    Presets:")?;
        for (n, preset) in self.presets.iter().enumerate() {
            writeln!(f, "      [{n}] {preset}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Loading and Saving
// =============================================================================

/// Read and validate settings through a storage backend
pub fn read_settings<S: StorageBackend>(storage: &S, path: &Path) -> Result<Settings> {
    let settings: Settings = storage.read(path)?;
    settings.validate()?;
    debug!("Read settings from {}", path.display());
    Ok(settings)
}

/// Validate and write settings through a storage backend
pub fn write_settings<S: StorageBackend>(
    storage: &S,
    path: &Path,
    settings: &Settings,
) -> Result<()> {
    settings.validate()?;
    storage.write(path, settings)?;
    info!("Settings saved to {}", path.display());
    Ok(())
}

/// Loads saved settings from JSON file.
///
/// # Errors
///
/// * `Error::FileRead` if the file cannot be read
/// * `Error::Serialize` if it is not valid settings JSON
/// * `Error::InvalidSettingValue` if a value is out of range
pub fn get_settings(file_path: impl AsRef<Path>) -> Result<Settings> {
    read_settings(&JsonStorage::new(), file_path.as_ref())
}

/// Saves settings to a pretty-printed JSON file, atomically.
pub fn save_settings(file_path: impl AsRef<Path>, settings: &Settings) -> Result<()> {
    write_settings(&JsonStorage::new(), file_path.as_ref(), settings)
}

// =============================================================================
// Tests
// =============================================================================
