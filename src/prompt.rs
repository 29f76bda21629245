//! Line-oriented terminal prompts
//!
//! [`Prompter`] wraps any `BufRead`/`Write` pair, so the binary can hand it
//! stdin/stdout while tests hand it a `Cursor` and a `Vec<u8>`.

use crate::config::NumberConstraints;
use crate::error::{Error, Result};

use log::debug;
use std::fmt::Display;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Borrow the output sink
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Take back the underlying reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write one line and flush
    ///
    /// # Errors
    ///
    /// Returns `Error::Output` if the sink fails.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").map_err(Error::Output)?;
        self.output.flush().map_err(Error::Output)
    }

    /// Read one raw line, without its line ending.
    ///
    /// # Errors
    ///
    /// * `Error::InputClosed` at end of input
    /// * `Error::Input` if reading fails
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(Error::Input)?;
        if read == 0 {
            debug!("Input reached end-of-file");
            return Err(Error::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Read a line, retrying (with `retry_prompt`) when the bytes are not UTF-8
    fn next_line(&mut self, retry_prompt: &str) -> Result<String> {
        loop {
            match self.read_line() {
                Err(Error::Input(e)) if e.kind() == ErrorKind::InvalidData => {
                    self.say(format!("error: {e}"))?;
                    self.say(retry_prompt)?;
                }
                other => return other,
            }
        }
    }

    /// Gets user input and returns a number if valid
    ///
    /// Re-prompts with `retry_prompt` until the trimmed input parses as `T`.
    pub fn get_user_num<T: FromStr>(&mut self, retry_prompt: &str) -> Result<T> {
        loop {
            let input = self.next_line(retry_prompt)?;
            match input.trim().parse::<T>() {
                Ok(num) => return Ok(num),
                Err(_) => {
                    self.say(format!(
                        "error: input cannot be parsed as {}",
                        std::any::type_name::<T>()
                    ))?;
                    self.say(retry_prompt)?;
                }
            }
        }
    }

    /// Like [`get_user_num`](Self::get_user_num), but also re-prompts until the
    /// value satisfies `constraints`.
    pub fn get_checked_num(
        &mut self,
        retry_prompt: &str,
        constraints: &NumberConstraints,
    ) -> Result<f64> {
        loop {
            let value: f64 = self.get_user_num(retry_prompt)?;
            match constraints.validate(value) {
                Ok(()) => return Ok(value),
                Err(reason) => {
                    self.say(format!("error: {reason}"))?;
                    self.say(retry_prompt)?;
                }
            }
        }
    }

    /// Prompts user to confirm action before proceeding.
    ///
    /// Only `y` or `yes` (any case) confirm.
    pub fn confirm(&mut self, query: &str) -> Result<bool> {
        self.say(query)?;

        let input = match self.read_line() {
            Ok(line) => line,
            Err(Error::Input(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        let input = input.trim().to_lowercase();

        Ok(input == "y" || input == "yes")
    }

    /// Read whitespace-separated indices, each below `len`.
    ///
    /// Re-prompts on empty input, unparseable numbers or out-of-range indices.
    pub fn get_selection(&mut self, retry_prompt: &str, len: usize) -> Result<Vec<usize>> {
        loop {
            let input = self.next_line(retry_prompt)?;
            let parsed: std::result::Result<Vec<usize>, _> =
                input.split_whitespace().map(str::parse::<usize>).collect();

            let problem = match parsed {
                Ok(selection) if selection.is_empty() => "error: nothing selected".to_string(),
                Ok(selection) => match selection.iter().find(|&&n| n >= len) {
                    Some(n) => format!("error: {n} is not a valid choice"),
                    None => return Ok(selection),
                },
                Err(e) => format!("error: {e}"),
            };
            self.say(problem)?;
            self.say(retry_prompt)?;
        }
    }
}
