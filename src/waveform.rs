//! Pulse train synthesis and the in-progress waveform
//!
//! A waveform is built by appending segments. Each segment repeats the pulse shape
//! at a fixed frequency for a fixed duration, padding the rest of every period with
//! a constant filler value.

use crate::config::fields;
use crate::error::{Error, Result};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Pulse Train Parameters
// =============================================================================

/// Parameters for one waveform segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseTrain {
    /// Pulses per second; `0.0` produces a filler-only segment
    pub pulse_frequency_hz: f64,
    /// Segment length in seconds
    pub duration_sec: f64,
    /// Value written between pulses
    pub filler: f64,
}

impl PulseTrain {
    pub fn new(pulse_frequency_hz: f64, duration_sec: f64, filler: f64) -> Self {
        Self {
            pulse_frequency_hz,
            duration_sec,
            filler,
        }
    }

    /// Check every parameter against its constraints
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("pulse frequency", self.pulse_frequency_hz, fields::pulse_frequency_hz()),
            ("duration", self.duration_sec, fields::duration_sec()),
            ("filler", self.filler, fields::filler()),
        ];
        for (name, value, constraints) in checks {
            constraints
                .validate(value)
                .map_err(|reason| Error::InvalidParameter {
                    name: name.to_string(),
                    reason,
                })?;
        }
        Ok(())
    }
}

/// Check that `train` yields a segment of bounded size at `sample_rate_hz`.
///
/// At most one pulse may start per sample, and the segment may not exceed
/// [`fields::MAX_SEGMENT_SAMPLES`].
fn validate_segment(sample_rate_hz: f64, train: &PulseTrain) -> Result<()> {
    if train.pulse_frequency_hz > sample_rate_hz {
        return Err(Error::InvalidParameter {
            name: "pulse frequency".to_string(),
            reason: format!("Value must be at most the sampling rate ({sample_rate_hz} Hz)"),
        });
    }

    let samples = (sample_rate_hz * train.duration_sec).round();
    if samples > fields::MAX_SEGMENT_SAMPLES as f64 {
        return Err(Error::InvalidParameter {
            name: "duration".to_string(),
            reason: format!(
                "Segment would hold {samples:e} samples, more than the limit of {}",
                fields::MAX_SEGMENT_SAMPLES
            ),
        });
    }
    Ok(())
}

/// Check a sampling rate
pub(crate) fn validate_sample_rate(sample_rate_hz: f64) -> Result<()> {
    fields::sample_rate_hz()
        .validate(sample_rate_hz)
        .map_err(|reason| Error::InvalidParameter {
            name: "sampling rate".to_string(),
            reason,
        })
}

// =============================================================================
// Synthesis
// =============================================================================

/// Build one segment in which `pulse_shape` repeats as specified by `train`.
///
/// With a zero frequency the segment is `trunc(rate * duration)` filler samples.
/// Otherwise pulse `k` starts on the sample nearest `k / frequency` seconds and the
/// segment is exactly `round(rate * duration)` samples long. A pulse longer than
/// its period is clipped where the next one begins.
///
/// Parameters are not validated here; see [`Waveform::append`]. Generation stops
/// as soon as the segment reaches its final length.
///
/// # Example
///
/// ```rust
/// use wave2text::{PulseTrain, wave_gen};
///
/// // 2 pulses per second at 10 samples per second for one second
/// let segment = wave_gen(&[1.0, 1.0], 10.0, &PulseTrain::new(2.0, 1.0, 0.0));
/// assert_eq!(segment, vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
/// ```
#[must_use]
pub fn wave_gen(pulse_shape: &[f64], sample_rate_hz: f64, train: &PulseTrain) -> Vec<f64> {
    let PulseTrain {
        pulse_frequency_hz,
        duration_sec,
        filler,
    } = *train;

    if pulse_frequency_hz == 0.0 {
        return vec![filler; (sample_rate_hz * duration_sec) as usize];
    }

    let period_sec = 1.0 / pulse_frequency_hz;
    let pulse_count = (pulse_frequency_hz * duration_sec).ceil() as u64;
    let final_len = (sample_rate_hz * duration_sec).round();

    let capacity = (final_len as usize).min(fields::MAX_SEGMENT_SAMPLES);
    let mut segment = Vec::with_capacity(capacity);
    for pulse_index in 0..pulse_count {
        if segment.len() as f64 >= final_len {
            break;
        }
        segment.extend_from_slice(pulse_shape);

        let period_end = (period_sec * sample_rate_hz * (pulse_index as f64 + 1.0)).round();
        let target = f64::min(final_len, period_end) as usize;
        // resize pads with filler or clips an overlong pulse
        segment.resize(target, filler);
    }

    segment
}

// =============================================================================
// History
// =============================================================================

/// Record of one appended segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// `Manual` or `Preset {n}`
    pub name: String,
    pub sample_rate_hz: f64,
    pub train: PulseTrain,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "    Sampling rate:   {} Hz", self.sample_rate_hz)?;
        writeln!(f, "    Pulse frequency: {} Hz", self.train.pulse_frequency_hz)?;
        writeln!(f, "    Duration:        {} s", self.train.duration_sec)?;
        writeln!(f, "    Filler:          {}", self.train.filler)
    }
}

// =============================================================================
// Waveform
// =============================================================================

/// The waveform under construction plus the history of how it was built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    history: Vec<HistoryEntry>,
}

impl Waveform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a segment and append it to the end of the waveform.
    ///
    /// Returns the number of samples added.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the sampling rate or any train
    /// parameter is out of range, if the frequency exceeds the sampling rate, or
    /// if the segment would be longer than [`fields::MAX_SEGMENT_SAMPLES`]. The
    /// waveform is left untouched in that case.
    pub fn append(
        &mut self,
        pulse_shape: &[f64],
        sample_rate_hz: f64,
        train: &PulseTrain,
        name: impl Into<String>,
    ) -> Result<usize> {
        validate_sample_rate(sample_rate_hz)?;
        train.validate()?;
        validate_segment(sample_rate_hz, train)?;

        let segment = wave_gen(pulse_shape, sample_rate_hz, train);
        let added = segment.len();
        self.samples.extend(segment);

        let entry = HistoryEntry {
            name: name.into(),
            sample_rate_hz,
            train: *train,
        };
        info!(
            "Appended {} ({added} samples, total {})",
            entry.name,
            self.samples.len()
        );
        self.history.push(entry);

        Ok(added)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.history.is_empty()
    }

    /// Playback length at the given sampling rate
    pub fn duration_sec(&self, sample_rate_hz: f64) -> f64 {
        self.samples.len() as f64 / sample_rate_hz
    }

    pub fn clear(&mut self) {
        debug!("Clearing waveform ({} samples)", self.samples.len());
        self.samples.clear();
        self.history.clear();
    }

    /// One sample per line
    pub fn samples_text(&self) -> String {
        self.samples
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// History entries separated by blank lines
    pub fn history_text(&self) -> String {
        self.history
            .iter()
            .map(HistoryEntry::to_string)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
