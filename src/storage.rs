//! Settings persistence and atomic file writes

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

// =============================================================================
// Atomic Writes
// =============================================================================

/// Write `content` next to `path` as `{file_name}.tmp`, then rename it over `path`.
///
/// A reader never sees a half-written settings file or export. Missing parent
/// directories are created.
///
/// # Errors
///
/// * `Error::Config` if `path` has no file name
/// * `Error::DirectoryCreate` / `Error::FileWrite` on I/O failure
pub fn write_atomic(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    let Some(file_name) = path.file_name() else {
        return Err(Error::Config(format!(
            "Cannot write '{}': path has no file name",
            path.display()
        )));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::error::create_dir(parent)?;
    }

    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    crate::error::write_file(&temp_path, content)?;
    std::fs::rename(&temp_path, path).map_err(|source| {
        let _ = std::fs::remove_file(&temp_path);
        Error::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

// =============================================================================
// Storage Backends
// =============================================================================

/// On-disk format for the settings file
pub trait StorageBackend: Clone + Send + Sync {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = crate::error::read_file(path)?;
        self.deserialize(&content)
    }

    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        write_atomic(path, self.serialize(data)?)
    }
}

/// Pretty-printed JSON settings
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonStorage;

impl JsonStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for JsonStorage {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        Ok(serde_json::from_str(content)?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        pulse_path: String,
        sample_rate_hz: f64,
    }

    fn sample() -> TestData {
        TestData {
            pulse_path: "pulse.txt".into(),
            sample_rate_hz: 100000.0,
        }
    }

    #[test]
    fn test_json_serialize_pretty() {
        let json = JsonStorage::new().serialize(&sample()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"pulse_path\": \"pulse.txt\""));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/settings.json");

        storage.write(&path, &sample()).unwrap();
        let loaded: TestData = storage.read(&path).unwrap();

        assert_eq!(loaded, sample());
        assert!(!dir.path().join("nested/dir/settings.json.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trial.txt");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "1\n0").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\n0");
        assert!(!dir.path().join("trial.txt.tmp").exists());
    }

    #[test]
    fn test_write_atomic_needs_file_name() {
        assert!(matches!(
            write_atomic(Path::new("/"), "x").unwrap_err(),
            Error::Config(_)
        ));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let storage = JsonStorage::new();
        let result: Result<TestData> = storage.read(Path::new("/nonexistent/file.json"));

        assert!(matches!(result.unwrap_err(), Error::FileRead { .. }));
    }

    #[test]
    fn test_read_malformed_json() {
        let storage = JsonStorage::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<TestData> = storage.read(&path);
        assert!(matches!(result.unwrap_err(), Error::Serialize(_)));
    }
}
