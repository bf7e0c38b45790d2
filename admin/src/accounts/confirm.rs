//! Operator confirmation.

use std::io::{self, BufRead, Write};

/// Asks the operator a question and returns the raw answer.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> io::Result<String>;
}

/// Scripted responders: any closure from prompt text to answer.
impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn confirm(&mut self, message: &str) -> io::Result<String> {
        self(message)
    }
}

/// Prompts on stdout and reads one line from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> io::Result<String> {
        prompt_line(&mut io::stdin().lock(), &mut io::stdout().lock(), message)
    }
}

/// Write `message`, then read a single line. EOF yields an empty answer.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

/// Whether an answer counts as "yes". Only `y` does, in either case.
///
/// The line terminator is already gone; any other padding cancels.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y")
}
