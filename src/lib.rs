//! # wave2text - Pulse Train Waveform Builder
//!
//! Build waveforms out of repeated pulses and export them as plain text, one sample
//! per line, together with a readable history of how the waveform was assembled.
//!
//! ## Features
//!
//! - **Pulse Shapes**: Load any pulse from a text file (one sample per line)
//! - **Pulse Trains**: Repeat the pulse at a frequency for a duration, padding with a filler value
//! - **Presets**: Store frequently used pulse trains in `settings.json`
//! - **History**: Every appended segment is recorded and exported alongside the samples
//! - **Interactive Menu**: Terminal front end driven through any `BufRead`/`Write` pair
//!
//! ## Quick Start
//!
//! ```rust
//! use wave2text::{PulseTrain, Waveform};
//!
//! let pulse = [-1.0, -1.0, 1.0, 1.0];
//! let mut waveform = Waveform::new();
//!
//! // 10 pulses per second for half a second, sampled at 1 kHz
//! waveform.append(&pulse, 1000.0, &PulseTrain::new(10.0, 0.5, 0.0), "Manual")?;
//! // followed by a quarter second of silence
//! waveform.append(&pulse, 1000.0, &PulseTrain::new(0.0, 0.25, 0.0), "Manual")?;
//!
//! assert_eq!(waveform.len(), 750);
//! assert_eq!(waveform.history().len(), 2);
//! # Ok::<(), wave2text::Error>(())
//! ```
//!
//! ## Settings File
//!
//! ```json
//! {
//!   "pulse_path": "pulse.txt",
//!   "sample_rate_hz": 100000.0,
//!   "filler": 0.0,
//!   "presets_phase_duration_filler": [[20.0, 1.5, 0.0], [0.0, 0.5, 0.0]]
//! }
//! ```
//!
//! Each preset is `[frequency_hz, duration_s, filler]`; the filler may be omitted to
//! use the top-level `filler`. Missing fields take their defaults.
//!
//! ## Interactive Session
//!
//! ```rust,no_run
//! use std::io;
//! use wave2text::{AppConfig, Prompter, Session};
//!
//! # fn example() -> wave2text::Result<()> {
//! let config = AppConfig::builder().config_dir("~/pulses").build();
//! let prompter = Prompter::new(io::stdin().lock(), io::stdout());
//! let mut session = Session::open(config, prompter)?;
//! session.run()?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod error;
pub mod export;
pub mod menu;
pub mod prompt;
pub mod pulse;
pub mod session;
pub mod storage;
pub mod waveform;

// Grouped modules
pub mod config;

// Re-exports from core
pub use error::{Error, Result};
pub use export::{ExportPaths, export_waveform};
pub use menu::{MenuChoice, terminal_menu};
pub use prompt::Prompter;
pub use pulse::{default_pulse_shape, get_pulse_shape};
pub use session::Session;
pub use storage::{JsonStorage, StorageBackend};
pub use waveform::{HistoryEntry, PulseTrain, Waveform, wave_gen};

// Re-exports from config
pub use config::{AppConfig, AppConfigBuilder, Preset, Settings, get_settings, save_settings};
