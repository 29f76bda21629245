//! Main menu

use crate::error::Result;
use crate::prompt::Prompter;

use std::io::{BufRead, Write};

const MENU_PROMPT: &str = "Please enter a number 1-8.";

/// Entries of the main menu, numbered 1-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddManual,
    AddPresets,
    ViewHistory,
    ClearWaveform,
    ExportWaveform,
    EditPresets,
    EditSampleRate,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::AddManual,
        MenuChoice::AddPresets,
        MenuChoice::ViewHistory,
        MenuChoice::ClearWaveform,
        MenuChoice::ExportWaveform,
        MenuChoice::EditPresets,
        MenuChoice::EditSampleRate,
        MenuChoice::Exit,
    ];

    /// Map a menu number to its choice
    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(usize::from(i)))
            .copied()
    }

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    fn label(self, sample_rate_hz: f64) -> String {
        match self {
            MenuChoice::AddManual => "Add to waveform manually.".into(),
            MenuChoice::AddPresets => "Add presets to waveform.".into(),
            MenuChoice::ViewHistory => "View waveform history.".into(),
            MenuChoice::ClearWaveform => "Clear waveform.".into(),
            MenuChoice::ExportWaveform => "Export waveform.".into(),
            MenuChoice::EditPresets => "View/edit presets.".into(),
            MenuChoice::EditSampleRate => format!("Edit sampling rate ({sample_rate_hz} Hz)."),
            MenuChoice::Exit => "Exit program.".into(),
        }
    }
}

/// Menu text shown before each choice
pub fn render_menu(sample_rate_hz: f64) -> String {
    let mut text = String::from("\n\nWhat would you like to do?\n\n");
    for choice in MenuChoice::ALL {
        text.push_str(&format!(
            "    [{}]. {}\n",
            choice.number(),
            choice.label(sample_rate_hz)
        ));
    }
    text.push('\n');
    text.push_str(MENU_PROMPT);
    text
}

/// Brings up the menu and returns the input if valid.
pub fn terminal_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    sample_rate_hz: f64,
) -> Result<MenuChoice> {
    prompter.say(render_menu(sample_rate_hz))?;
    loop {
        let input: u8 = prompter.get_user_num(MENU_PROMPT)?;

        match MenuChoice::from_number(input) {
            Some(choice) => return Ok(choice),
            None => {
                prompter.say("error: number outside valid range")?;
                prompter.say(MENU_PROMPT)?;
            }
        }
    }
}
