//! Writing the waveform and its history to text files

use crate::config::fields;
use crate::error::{Error, Result};
use crate::storage::write_atomic;
use crate::waveform::Waveform;

use log::{info, warn};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

/// Files written by [`export_waveform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// `{name}.txt`: one sample per line
    pub waveform: PathBuf,
    /// `{name}_history.txt`: the segment history
    pub history: PathBuf,
}

/// Trim and check a save name.
///
/// # Errors
///
/// Returns `Error::InvalidFileName` if the name is empty or could escape the
/// export directory.
pub fn validate_save_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidFileName {
            name: name.to_string(),
            reason: "Name cannot be empty".into(),
        });
    }
    fields::save_name()
        .validate(name)
        .map_err(|_| Error::InvalidFileName {
            name: name.to_string(),
            reason: "Use letters, digits, spaces, '.', '_' or '-', starting with a letter or digit"
                .into(),
        })?;
    Ok(name)
}

/// Timestamped name used when the user leaves the name blank
pub fn default_save_name() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!("[year][month][day]_[hour][minute][second]");
    match now.format(format) {
        Ok(stamp) => format!("waveform_{stamp}"),
        Err(e) => {
            warn!("Failed to format timestamp: {e}");
            "waveform".to_string()
        }
    }
}

/// Write `{saved_dir}/{name}.txt` and `{saved_dir}/{name}_history.txt`.
///
/// `saved_dir` is created if missing.
///
/// # Errors
///
/// * `Error::InvalidFileName` for a bad name
/// * `Error::DirectoryCreate` / `Error::FileWrite` on I/O failure
pub fn export_waveform(saved_dir: &Path, name: &str, waveform: &Waveform) -> Result<ExportPaths> {
    let name = validate_save_name(name)?;
    crate::error::create_dir(saved_dir)?;

    let paths = ExportPaths {
        waveform: saved_dir.join(format!("{name}.txt")),
        history: saved_dir.join(format!("{name}_history.txt")),
    };

    if waveform.is_empty() {
        warn!("Exporting an empty waveform to {}", paths.waveform.display());
    }

    write_atomic(&paths.waveform, waveform.samples_text())?;
    write_atomic(&paths.history, waveform.history_text())?;

    info!(
        "Exported {} samples to {}",
        waveform.len(),
        paths.waveform.display()
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::PulseTrain;
    use tempfile::tempdir;

    #[test]
    fn test_validate_save_name() {
        assert_eq!(validate_save_name("  run 1 \n").unwrap(), "run 1");
        assert!(validate_save_name("").is_err());
        assert!(validate_save_name("   ").is_err());
        assert!(validate_save_name("../up").is_err());
        assert!(validate_save_name("dir/file").is_err());
        assert!(validate_save_name("dir\\file").is_err());
    }

    #[test]
    fn test_default_save_name_shape() {
        let name = default_save_name();
        assert!(name.starts_with("waveform_"));
        assert!(validate_save_name(&name).is_ok());
        assert_eq!(name.len(), "waveform_YYYYMMDD_HHMMSS".len());
    }

    #[test]
    fn test_export_creates_both_files() {
        let dir = tempdir().unwrap();
        let saved = dir.path().join("saved");

        let mut waveform = Waveform::new();
        waveform
            .append(&[1.0], 4.0, &PulseTrain::new(2.0, 1.0, 0.0), "Manual")
            .unwrap();

        let paths = export_waveform(&saved, "trial", &waveform).unwrap();
        assert_eq!(paths.waveform, saved.join("trial.txt"));
        assert_eq!(paths.history, saved.join("trial_history.txt"));

        assert_eq!(std::fs::read_to_string(&paths.waveform).unwrap(), "1\n0\n1\n0");
        let history = std::fs::read_to_string(&paths.history).unwrap();
        assert!(history.starts_with("Manual\n    Sampling rate:   4 Hz"));
        assert!(!history.ends_with('\n'));
    }

    #[test]
    fn test_export_rejects_bad_name_without_writing() {
        let dir = tempdir().unwrap();
        let saved = dir.path().join("saved");

        let err = export_waveform(&saved, "../evil", &Waveform::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidFileName { .. }));
        assert!(!saved.exists());
    }
}
