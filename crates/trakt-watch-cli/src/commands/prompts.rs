use color_eyre::Result;
use dialoguer::console::Term;
use dialoguer::{Confirm, Input, Password};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use tracing::debug;
use trakt_watch_core::Prompter;

fn to_io(err: dialoguer::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// dialoguer-backed prompts. Listings and questions both go to the terminal
/// (stderr), so `-q` and `--output json` leave them visible and keep stdout clean.
pub struct TerminalPrompter<W: Write = Term> {
    term: Term,
    listing: W,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::with_listing(Term::stderr())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPrompter<W> {
    fn with_listing(listing: W) -> Self {
        Self {
            term: Term::stderr(),
            listing,
        }
    }

    fn write_listing(&mut self, line: &str) {
        if let Err(e) = writeln!(self.listing, "{}", line) {
            debug!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> Prompter for TerminalPrompter<W> {
    fn display(&mut self, line: &str) {
        self.write_listing(line);
    }

    fn report_error(&mut self, message: &str) {
        let message = message.red().to_string();
        self.write_listing(&message);
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default_value) = default {
            input = input.default(default_value.to_string());
        }
        input.interact_text_on(&self.term).map_err(to_io)
    }

    fn read_char(&mut self, prompt: &str) -> io::Result<char> {
        self.term.write_str(prompt)?;
        let key = self.term.read_char()?;
        self.term.write_line("")?;
        Ok(key)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term)
            .map_err(to_io)
    }
}

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }
    input_builder
        .interact_text_on(&Term::stderr())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret without echoing it
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact_on(&Term::stderr())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}
