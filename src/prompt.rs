//! Interactive collection of run parameters.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{Result, WsAuditError};

/// Values the interactive prompt can change. Each field holds the current
/// value, which an empty answer keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAnswers {
    pub query: String,
    pub threshold: usize,
    pub max_repos: usize,
    pub verbose: bool,
    pub narrow: bool,
}

/// Ask the five run questions on `output`, reading answers from `input`.
///
/// # Errors
/// Returns [`WsAuditError::Prompt`] if input ends before all questions are
/// answered, or an I/O error if the streams fail.
pub fn collect_answers<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: PromptAnswers,
) -> Result<PromptAnswers> {
    let mut prompt = Prompt { input, output };

    let query = prompt.ask(&format!(
        "Enter the topic to search for (or 'all' for any repositories) [{}]: ",
        current.query
    ))?;
    let query = if query.is_empty() { current.query } else { query };

    let threshold = prompt.ask_positive(
        "Enter the number of consecutive spaces/tabs to flag",
        current.threshold,
    )?;
    let max_repos =
        prompt.ask_positive("Enter the maximum number of repositories", current.max_repos)?;
    let verbose = prompt.ask_yes_no("Enable verbose output?", current.verbose)?;
    let narrow = prompt.ask_yes_no(
        "Check out only files with the scanned extensions?",
        current.narrow,
    )?;

    Ok(PromptAnswers {
        query,
        threshold,
        max_repos,
        verbose,
        narrow,
    })
}

struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(WsAuditError::Prompt(
                "input ended before all questions were answered".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask_positive(&mut self, question: &str, current: usize) -> Result<usize> {
        loop {
            let answer = self.ask(&format!("{question} [{current}]: "))?;
            if answer.is_empty() {
                return Ok(current);
            }
            match parse_positive(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "Please enter a whole number of at least 1.")?,
            }
        }
    }

    fn ask_yes_no(&mut self, question: &str, current: bool) -> Result<bool> {
        let hint = if current { "Y/n" } else { "y/N" };
        loop {
            let answer = self.ask(&format!("{question} ({hint}): "))?;
            if answer.is_empty() {
                return Ok(current);
            }
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }
}

fn parse_positive(answer: &str) -> Option<usize> {
    usize::from_str(answer).ok().filter(|value| *value >= 1)
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
