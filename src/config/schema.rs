//! Value constraints for settings and pulse train parameters
//!
//! # Overview
//!
//! Every number the user types (sampling rate, pulse frequency, duration, filler) and
//! every number read back from `settings.json` is checked against a [`NumberConstraints`].
//! File names typed at the export prompt are checked against a [`TextConstraints`].
//!
//! Constraints are plain data, so the same rule drives the interactive re-prompt loop
//! and the validation of a loaded settings file:
//!
//! ```rust
//! use wave2text::config::{NumberConstraints, fields};
//!
//! let rate = fields::sample_rate_hz();
//! assert!(rate.validate(100000.0).is_ok());
//! assert!(rate.validate(0.0).is_err());
//!
//! let percent = NumberConstraints::new().min(0.0).max(100.0);
//! assert!(percent.validate(50.0).is_ok());
//! assert!(percent.validate(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Number Constraints
// =============================================================================

/// Constraints for numeric values
///
/// Non-finite values (`NaN`, `inf`) are always rejected. `"nan"` and `"inf"` parse
/// successfully as `f64`, so this is the only place they get caught.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NumberConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// When true, `min` itself is rejected (value must be strictly greater)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub min_exclusive: bool,
}

impl NumberConstraints {
    /// Unbounded (finite values only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set inclusive minimum
    #[must_use]
    pub fn min(mut self, val: f64) -> Self {
        self.min = Some(val);
        self.min_exclusive = false;
        self
    }

    /// Set exclusive minimum
    #[must_use]
    pub fn greater_than(mut self, val: f64) -> Self {
        self.min = Some(val);
        self.min_exclusive = true;
        self
    }

    /// Set inclusive maximum
    #[must_use]
    pub fn max(mut self, val: f64) -> Self {
        self.max = Some(val);
        self
    }

    /// Validate a value against these constraints
    pub fn validate(&self, value: f64) -> Result<(), String> {
        if !value.is_finite() {
            return Err("Value must be a finite number".to_string());
        }

        if let Some(min) = self.min {
            if self.min_exclusive && value <= min {
                return Err(format!("Value must be greater than {min}"));
            }
            if !self.min_exclusive && value < min {
                return Err(format!("Value must be at least {min}"));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!("Value must be at most {max}"));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Text Constraints
// =============================================================================

/// Constraints for text values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TextConstraints {
    /// Regex pattern for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl TextConstraints {
    /// Require text to match a regex pattern
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
        }
    }

    /// Validate text against the pattern
    pub fn validate(&self, text: &str) -> Result<(), String> {
        if let Some(ref pattern) = self.pattern {
            let re =
                regex::Regex::new(pattern).map_err(|e| format!("Invalid regex pattern: {e}"))?;

            if !re.is_match(text) {
                return Err(format!("Value does not match pattern: {pattern}"));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Well-known Fields
// =============================================================================

/// Constraints for every value wave2text reads from the user or the settings file.
pub mod fields {
    use super::{NumberConstraints, TextConstraints};

    /// Settings key for the pulse shape file
    pub const PULSE_PATH: &str = "pulse_path";
    /// Settings key for the sampling rate
    pub const SAMPLE_RATE_HZ: &str = "sample_rate_hz";
    /// Settings key for the default filler
    pub const FILLER: &str = "filler";

    /// Highest accepted sampling rate (10 MHz)
    pub const MAX_SAMPLE_RATE_HZ: f64 = 10_000_000.0;
    /// Most samples a single appended segment may hold (400 MB of `f64`)
    pub const MAX_SEGMENT_SAMPLES: usize = 50_000_000;

    /// Sampling rate in Hz: strictly positive, at most [`MAX_SAMPLE_RATE_HZ`]
    pub fn sample_rate_hz() -> NumberConstraints {
        NumberConstraints::new()
            .greater_than(0.0)
            .max(MAX_SAMPLE_RATE_HZ)
    }

    /// Pulse frequency in Hz: zero means a filler-only segment
    pub fn pulse_frequency_hz() -> NumberConstraints {
        NumberConstraints::new().min(0.0)
    }

    /// Segment duration in seconds: strictly positive
    pub fn duration_sec() -> NumberConstraints {
        NumberConstraints::new().greater_than(0.0)
    }

    /// Filler value: any finite number
    pub fn filler() -> NumberConstraints {
        NumberConstraints::new()
    }

    /// Export file name: no path separators, must start with an alphanumeric
    pub fn save_name() -> TextConstraints {
        TextConstraints::pattern(r"^[A-Za-z0-9][A-Za-z0-9 _.\-]*$")
    }
}
