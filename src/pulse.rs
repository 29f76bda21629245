//! Pulse shape loading
//!
//! A pulse shape file is plain text with one sample per line. Windows and Unix line
//! endings are both accepted and blank lines are ignored.

use crate::error::{Error, Result};

use log::{debug, info};
use std::path::Path;

/// Number of samples in each half of the built-in pulse
const DEFAULT_HALF_LEN: usize = 20;

/// Loads pulse shape from TXT file.
///
/// # Errors
///
/// * `Error::FileRead` if the file cannot be read
/// * `Error::PulseParse` naming the first line that is not a number
/// * `Error::EmptyPulse` if the file holds no samples
pub fn get_pulse_shape(file_path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = file_path.as_ref();
    let content = crate::error::read_file(path)?;

    let pulse = parse_pulse_shape(&content).map_err(|(line, value)| Error::PulseParse {
        path: path.to_path_buf(),
        line,
        value,
    })?;

    if pulse.is_empty() {
        return Err(Error::EmptyPulse(path.to_path_buf()));
    }

    info!("Loaded {} pulse samples from {}", pulse.len(), path.display());
    Ok(pulse)
}

/// Parse pulse samples from text.
///
/// On failure returns the 1-based line number and the offending text.
pub fn parse_pulse_shape(content: &str) -> std::result::Result<Vec<f64>, (usize, String)> {
    let mut pulse = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let sample = line.trim();
        if sample.is_empty() {
            continue;
        }
        match sample.parse::<f64>() {
            Ok(value) if value.is_finite() => pulse.push(value),
            _ => return Err((index + 1, sample.to_string())),
        }
    }
    debug!("Parsed {} pulse samples", pulse.len());
    Ok(pulse)
}

/// Biphasic square pulse used when no pulse file can be loaded:
/// 20 samples at -1 followed by 20 samples at +1.
pub fn default_pulse_shape() -> Vec<f64> {
    let mut pulse = vec![-1.0; DEFAULT_HALF_LEN];
    pulse.extend(std::iter::repeat_n(1.0, DEFAULT_HALF_LEN));
    pulse
}
