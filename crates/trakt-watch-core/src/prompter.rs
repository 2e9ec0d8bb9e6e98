use crate::error::ResolveError;
use std::io;
use trakt_watch_models::Rating;

/// Blocking terminal primitives the interactive flows are written against.
///
/// Every read blocks the only thread of control until the user answers.
/// Implementations must return an error rather than loop forever once input
/// is exhausted.
pub trait Prompter {
    /// Informational output, one line
    fn display(&mut self, line: &str);

    /// A recoverable problem with the user's last answer
    fn report_error(&mut self, message: &str);

    /// Read one line of text. An empty answer yields `default` when given.
    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String>;

    /// Read a single key press without waiting for enter
    fn read_char(&mut self, prompt: &str) -> io::Result<char>;

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool>;
}

/// Ask until the answer parses as a non-negative integer.
pub fn read_number<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<u32, ResolveError> {
    loop {
        let answer = prompter.read_line(prompt, None)?;
        match answer.trim().parse::<u32>() {
            Ok(number) => return Ok(number),
            Err(_) => prompter.report_error(&format!("'{}' is not a valid integer", answer.trim())),
        }
    }
}

pub fn read_rating<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Rating, ResolveError> {
    loop {
        let answer = prompter.read_line("Rating", None)?;
        let parsed = answer
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("'{}' is not a valid integer", answer.trim()))
            .and_then(|value| Rating::new(value).map_err(|e| e.to_string()));
        match parsed {
            Ok(rating) => return Ok(rating),
            Err(message) => prompter.report_error(&message),
        }
    }
}

/// Ask until a non-blank answer is given
pub fn read_text<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<String, ResolveError> {
    loop {
        let answer = prompter.read_line(prompt, None)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        prompter.report_error("No input");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn test_read_number_reprompts_until_valid() {
        let mut prompter = ScriptedPrompter::new().lines(["two", "-1", " 2 "]);
        assert_eq!(read_number(&mut prompter, "Season").unwrap(), 2);
        assert_eq!(prompter.errors.len(), 2);
    }

    #[test]
    fn test_read_rating_rejects_out_of_range() {
        let mut prompter = ScriptedPrompter::new().lines(["11", "0", "8"]);
        assert_eq!(read_rating(&mut prompter).unwrap().value(), 8);
        assert_eq!(prompter.errors.len(), 2);
    }

    #[test]
    fn test_exhausted_input_is_a_terminal_error() {
        let mut prompter = ScriptedPrompter::new();
        assert!(matches!(
            read_text(&mut prompter, "Search for all"),
            Err(ResolveError::Terminal(_))
        ));
    }
}
