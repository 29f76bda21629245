//! Interactive session: the main menu loop and its handlers
//!
//! A [`Session`] owns everything the user edits during a run: the loaded settings,
//! the pulse shape, the current sampling rate and the waveform under construction.
//! All terminal I/O goes through its [`Prompter`].

use crate::config::{AppConfig, Preset, Settings, fields, read_settings, write_settings};
use crate::error::{Error, Result};
use crate::export::{default_save_name, export_waveform, validate_save_name};
use crate::menu::{MenuChoice, terminal_menu};
use crate::prompt::Prompter;
use crate::pulse::{default_pulse_shape, get_pulse_shape};
use crate::waveform::{PulseTrain, Waveform, validate_sample_rate};

use log::{debug, error, info, warn};
use std::io::{BufRead, Write};

const POSITIVE_PROMPT: &str = "Please enter a positive number.";
const NON_NEGATIVE_PROMPT: &str = "Please enter zero or a positive number.";
const NUMBER_PROMPT: &str = "Please enter a number.";
const PRESET_SELECT_PROMPT: &str =
    "Please enter the preset(s) you would like to add.\nYou can specify more than one by inserting a space between each number.";
const PRESET_REMOVE_PROMPT: &str =
    "Please enter the preset(s) you would like to remove.\nYou can specify more than one by inserting a space between each number.";
const PRESET_MENU_PROMPT: &str = "Please enter a number 1-4.";
const SAVE_NAME_PROMPT: &str =
    "Please enter a file name for the current waveform.\nLeave blank to use a timestamped name.";
const EXIT_CONFIRM: &str =
    "Are you sure you want to exit the program? Enter [Y] to confirm, or press any other key to return to menu.";
const PARAMS_CONFIRM: &str =
    "Are these parameters correct? Enter [Y] to confirm, or press any other key to re-enter them.";
const CLEAR_CONFIRM: &str =
    "Are you sure you want to clear the current waveform? Enter [Y] to confirm, or press any other key to return to menu without clearing.";
const CLEAR_AFTER_EXPORT_CONFIRM: &str =
    "Do you want to clear the current waveform? Enter [Y] to confirm, or press any other key to return to menu without clearing.";
const SAVE_RATE_CONFIRM: &str =
    "Do you want to save the new sampling rate to the settings file? Enter [Y] to confirm, or press any other key to keep it for this session only.";

/// Whether the menu loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive waveform editing session
pub struct Session<R, W> {
    config: AppConfig,
    settings: Settings,
    pulse: Vec<f64>,
    sample_rate_hz: f64,
    waveform: Waveform,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Load settings and the pulse shape, falling back to defaults on failure.
    ///
    /// The sampling rate comes from `config.sample_rate_hz` if set and valid, then
    /// the environment, then the settings file. Fallbacks are reported to the user
    /// and logged; only output errors abort.
    ///
    /// # Errors
    ///
    /// Returns `Error::Output` if the prompter cannot write.
    pub fn open(config: AppConfig, mut prompter: Prompter<R, W>) -> Result<Self> {
        let settings_path = config.settings_path();
        let mut settings = match read_settings(&config.storage, &settings_path) {
            Ok(settings) => {
                info!("Loaded settings from {}", settings_path.display());
                settings
            }
            Err(e) => {
                warn!("Using default settings: {e}");
                prompter.say(format!("\n\nerror loading settings: {e}"))?;
                prompter.say("Loading default settings...")?;
                Settings::default()
            }
        };

        settings.apply_env_overrides(&config.env_handler());
        prompter.say(format!("\n{}", settings.summary()))?;

        let pulse_path = settings.resolve_pulse_path(&config.config_dir);
        let pulse = match get_pulse_shape(&pulse_path) {
            Ok(pulse) => pulse,
            Err(e) => {
                warn!("Using default pulse shape: {e}");
                prompter.say(format!("error loading pulse shape from file: {e}"))?;
                prompter.say("Loading default pulse shape...")?;
                default_pulse_shape()
            }
        };

        let rate_override = config.sample_rate_hz;
        let mut session = Self::with_parts(config, settings, pulse, prompter);
        if let Some(rate) = rate_override {
            match session.set_sample_rate_hz(rate) {
                Ok(()) => {
                    info!("Sampling rate set to {rate} Hz for this run");
                    session
                        .prompter
                        .say(format!("Sampling rate for this run: {rate} Hz"))?;
                }
                Err(e) => {
                    warn!("Ignoring sampling rate override: {e}");
                    session.prompter.say(format!("error: {e}"))?;
                    session.prompter.say(format!(
                        "Keeping sampling rate of {} Hz.",
                        session.sample_rate_hz
                    ))?;
                }
            }
        }
        Ok(session)
    }

    /// Build a session from already-loaded parts
    pub fn with_parts(
        config: AppConfig,
        settings: Settings,
        pulse: Vec<f64>,
        prompter: Prompter<R, W>,
    ) -> Self {
        let sample_rate_hz = settings.sample_rate_hz;
        Self {
            config,
            settings,
            pulse,
            sample_rate_hz,
            waveform: Waveform::new(),
            prompter,
        }
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pulse(&self) -> &[f64] {
        &self.pulse
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Change the sampling rate for subsequent segments (not persisted)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` unless the rate is finite and positive.
    pub fn set_sample_rate_hz(&mut self, sample_rate_hz: f64) -> Result<()> {
        validate_sample_rate(sample_rate_hz)?;
        self.sample_rate_hz = sample_rate_hz;
        Ok(())
    }

    pub fn prompter(&self) -> &Prompter<R, W> {
        &self.prompter
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    // =========================================================================
    // Main loop
    // =========================================================================

    /// Run the menu loop until the user exits or input ends.
    ///
    /// Recoverable errors are shown to the user and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns terminal I/O errors (`Error::Input`, `Error::Output`).
    pub fn run(&mut self) -> Result<()> {
        loop {
            let step = terminal_menu(&mut self.prompter, self.sample_rate_hz)
                .and_then(|choice| self.dispatch(choice));

            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(Error::InputClosed) => {
                    info!("Input closed, leaving menu loop");
                    return Ok(());
                }
                Err(e @ (Error::Input(_) | Error::Output(_))) => return Err(e),
                Err(e) => {
                    error!("{e}");
                    self.prompter.say(format!("error: {e}"))?;
                }
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        debug!("Menu choice {choice:?}");
        match choice {
            MenuChoice::AddManual => self.edit_waveform()?,
            MenuChoice::AddPresets => self.add_presets()?,
            MenuChoice::ViewHistory => self.view_history()?,
            MenuChoice::ClearWaveform => self.clear_waveform()?,
            MenuChoice::ExportWaveform => self.export()?,
            MenuChoice::EditPresets => self.edit_presets()?,
            MenuChoice::EditSampleRate => self.edit_sample_rate()?,
            MenuChoice::Exit => {
                if self.prompter.confirm(EXIT_CONFIRM)? {
                    self.prompter.say("Exiting...")?;
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    /// Prompt for pulse train parameters until the user confirms them
    fn read_pulse_train(&mut self) -> Result<PulseTrain> {
        loop {
            self.prompter.say("\nPulse frequency (Hz)")?;
            let pulse_frequency_hz = self
                .prompter
                .get_checked_num(NON_NEGATIVE_PROMPT, &fields::pulse_frequency_hz())?;
            self.prompter.say("Duration (s)")?;
            let duration_sec = self
                .prompter
                .get_checked_num(POSITIVE_PROMPT, &fields::duration_sec())?;
            self.prompter.say("Filler value")?;
            let filler = self
                .prompter
                .get_checked_num(NUMBER_PROMPT, &fields::filler())?;

            self.prompter
                .say(format!("\nPulse frequency: {pulse_frequency_hz} Hz"))?;
            self.prompter.say(format!("Duration: {duration_sec} s"))?;
            self.prompter.say(format!("Filler: {filler}"))?;

            if self.prompter.confirm(PARAMS_CONFIRM)? {
                return Ok(PulseTrain::new(pulse_frequency_hz, duration_sec, filler));
            }
        }
    }

    /// User menu for editing the current waveform.
    pub fn edit_waveform(&mut self) -> Result<()> {
        let train = self.read_pulse_train()?;
        let added = self
            .waveform
            .append(&self.pulse, self.sample_rate_hz, &train, "Manual")?;
        self.prompter.say(format!(
            "Added {added} samples. Waveform is now {} samples long.",
            self.waveform.len()
        ))
    }

    fn list_presets(&mut self) -> Result<()> {
        let filler = self.settings.filler;
        let lines: Vec<String> = self
            .settings
            .presets
            .iter()
            .enumerate()
            .map(|(n, preset)| {
                let train = preset.train(filler);
                format!(
                    "\n    {n}\n    Pulse frequency: {} Hz\n    Duration:        {} s\n    Filler:          {}",
                    train.pulse_frequency_hz, train.duration_sec, train.filler
                )
            })
            .collect();
        for line in lines {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    fn add_presets(&mut self) -> Result<()> {
        if self.settings.presets.is_empty() {
            return self.prompter.say("No presets found. Returning to menu...");
        }

        self.list_presets()?;
        self.prompter.say(PRESET_SELECT_PROMPT)?;
        let selection = self
            .prompter
            .get_selection(PRESET_SELECT_PROMPT, self.settings.presets.len())?;

        for n in &selection {
            let preset = self
                .settings
                .presets
                .get(*n)
                .ok_or(Error::PresetNotFound(*n))?;
            let train = preset.train(self.settings.filler);
            self.waveform
                .append(&self.pulse, self.sample_rate_hz, &train, format!("Preset {n}"))?;
        }

        self.prompter.say(format!(
            "Added {} preset(s). Waveform is now {} samples long.",
            selection.len(),
            self.waveform.len()
        ))
    }

    fn view_history(&mut self) -> Result<()> {
        if self.waveform.is_empty() {
            return self.prompter.say("Waveform is empty. Returning to menu...");
        }

        let entries: Vec<String> = self
            .waveform
            .history()
            .iter()
            .map(ToString::to_string)
            .collect();
        for entry in entries {
            self.prompter.say(entry)?;
        }
        self.prompter.say(format!(
            "Total: {} samples ({} s at {} Hz)",
            self.waveform.len(),
            self.waveform.duration_sec(self.sample_rate_hz),
            self.sample_rate_hz
        ))?;
        self.prompter.say("\nPress Enter to return to menu.")?;
        self.prompter.read_line().map(|_| ())
    }

    fn clear_waveform(&mut self) -> Result<()> {
        if self.prompter.confirm(CLEAR_CONFIRM)? {
            self.waveform.clear();
            self.prompter.say("Waveform cleared.")?;
        }
        Ok(())
    }

    /// Ask for a save name until it is valid; blank picks a timestamped name
    fn read_save_name(&mut self) -> Result<String> {
        self.prompter.say(SAVE_NAME_PROMPT)?;
        loop {
            let input = self.prompter.read_line()?;
            if input.trim().is_empty() {
                let name = default_save_name();
                self.prompter.say(format!("Using name '{name}'."))?;
                return Ok(name);
            }
            match validate_save_name(&input) {
                Ok(name) => return Ok(name.to_string()),
                Err(e) => {
                    self.prompter.say(format!("error: {e}"))?;
                    self.prompter.say(SAVE_NAME_PROMPT)?;
                }
            }
        }
    }

    fn export(&mut self) -> Result<()> {
        let name = self.read_save_name()?;

        match export_waveform(&self.config.saved_dir, &name, &self.waveform) {
            Ok(paths) => {
                self.prompter
                    .say(format!("Waveform saved. ({})", paths.waveform.display()))?;
                self.prompter
                    .say(format!("Waveform history saved. ({})", paths.history.display()))?;
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.prompter.say(format!("error: {e}"))?;
                return self.prompter.say("Waveform was not saved.");
            }
        }

        if self.prompter.confirm(CLEAR_AFTER_EXPORT_CONFIRM)? {
            self.waveform.clear();
            self.prompter.say("Waveform cleared.")?;
        }
        Ok(())
    }

    fn edit_presets(&mut self) -> Result<()> {
        loop {
            if self.settings.presets.is_empty() {
                self.prompter.say("\nNo presets")?;
            } else {
                self.list_presets()?;
            }
            self.prompter.say(format!(
                "\n    [1]. Add preset.\n    [2]. Remove preset(s).\n    [3]. Save presets to settings file.\n    [4]. Return to menu.\n\n{PRESET_MENU_PROMPT}"
            ))?;

            let input: u8 = self.prompter.get_user_num(PRESET_MENU_PROMPT)?;
            match input {
                1 => {
                    let train = self.read_pulse_train()?;
                    self.settings.presets.push(Preset::from(train));
                    self.prompter.say(format!(
                        "Preset {} added.",
                        self.settings.presets.len() - 1
                    ))?;
                }
                2 => self.remove_presets()?,
                3 => self.save_settings()?,
                4 => return Ok(()),
                _ => self.prompter.say("error: number outside valid range")?,
            }
        }
    }

    fn remove_presets(&mut self) -> Result<()> {
        if self.settings.presets.is_empty() {
            return self.prompter.say("No presets to remove.");
        }

        self.prompter.say(PRESET_REMOVE_PROMPT)?;
        let mut selection = self
            .prompter
            .get_selection(PRESET_REMOVE_PROMPT, self.settings.presets.len())?;
        selection.sort_unstable_by(|a, b| b.cmp(a));
        selection.dedup();

        for n in &selection {
            self.settings.presets.remove(*n);
        }
        info!("Removed {} preset(s)", selection.len());
        self.prompter
            .say(format!("Removed {} preset(s).", selection.len()))
    }

    fn edit_sample_rate(&mut self) -> Result<()> {
        self.prompter.say("Please enter new sampling rate.")?;
        let rate = self
            .prompter
            .get_checked_num(POSITIVE_PROMPT, &fields::sample_rate_hz())?;
        self.set_sample_rate_hz(rate)?;
        self.prompter.say(format!("Sampling rate set to {rate} Hz."))?;

        if self.prompter.confirm(SAVE_RATE_CONFIRM)? {
            self.settings.sample_rate_hz = rate;
            self.save_settings()?;
        }
        Ok(())
    }

    /// Persist the current settings, reporting failure without aborting
    fn save_settings(&mut self) -> Result<()> {
        let path = self.config.settings_path();
        match write_settings(&self.config.storage, &path, &self.settings) {
            Ok(()) => self
                .prompter
                .say(format!("Settings saved. ({})", path.display())),
            Err(e) => {
                error!("Saving settings failed: {e}");
                self.prompter.say(format!("error: {e}"))?;
                self.prompter.say("Settings were not saved.")
            }
        }
    }
}
