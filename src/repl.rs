use std::io::{self, BufRead, Write};

use log::error;

use crate::{
    calculate,
    error::{CalcError, EvalError, ParseError},
};

/// Printed once when a session starts.
pub const BANNER: &str = "Simple Calculator (+, -, *, /, %, ^) - type 'exit' to quit.";

/// Printed before every line is read.
pub const PROMPT: &str = "Enter expression: ";

/// Whether a session keeps reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The next call to [`Session::step`] prompts for another line.
    Running,
    /// The user typed `exit` or the input ended.
    Exited,
}

/// What the loop does with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The user asked to leave.
    Exit,
    /// A line to print before the next prompt.
    Message(String),
}

/// Computes the reply to one line of input.
///
/// Surrounding whitespace is ignored and `exit` is matched without regard to
/// case. Every other line is calculated and rendered, so no input ends the
/// loop except `exit`.
///
/// # Example
/// ```
/// use safecalc::repl::{Reply, respond};
///
/// assert_eq!(respond("  EXIT \n"), Reply::Exit);
/// assert_eq!(respond("2 * (3 + 4) ^ 2"), Reply::Message("Result: 98".into()));
/// assert_eq!(respond("(1 + 2"), Reply::Message("Unmatched parentheses.".into()));
/// ```
#[must_use]
pub fn respond(line: &str) -> Reply {
    let line = line.trim();
    if line.eq_ignore_ascii_case("exit") {
        return Reply::Exit;
    }
    Reply::Message(render(&calculate(line)))
}

/// Formats the outcome of a calculation as the line shown to the user.
#[must_use]
pub fn render(outcome: &Result<f64, CalcError>) -> String {
    match outcome {
        // -0 prints as 0
        Ok(value) => format!("Result: {}", if *value == 0.0 { 0.0 } else { *value }),
        Err(CalcError::Parse(ParseError::UnbalancedParentheses { .. })) => "Unmatched parentheses.".to_string(),
        Err(CalcError::Parse(ParseError::Syntax { .. })) => "Syntax Error: Please check your expression.".to_string(),
        Err(e) if e.is_too_deeply_nested() => "Calculation Error: Expression is too deeply nested.".to_string(),
        Err(CalcError::Eval(EvalError::DivisionByZero)) => "Division by zero is not allowed.".to_string(),
        Err(e @ CalcError::Eval(EvalError::Internal { .. })) => {
            error!("{e}");
            format!("An unexpected error occurred: {e}")
        },
        Err(e) => format!("Calculation Error: {e}"),
    }
}

/// A read-evaluate-print loop over any line source and sink.
///
/// The terminal binary runs it on stdin and stdout; tests run it on in-memory
/// buffers.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use safecalc::repl::{Session, SessionState};
///
/// let mut session = Session::new(Cursor::new("1 + 1\nexit\n"), Vec::new());
/// session.run().unwrap();
/// assert_eq!(session.state(), SessionState::Exited);
///
/// let output = String::from_utf8(session.into_output()).unwrap();
/// assert!(output.contains("Result: 2\n"));
/// ```
#[derive(Debug)]
pub struct Session<R, W> {
    input:  R,
    output: W,
    state:  SessionState,
}

impl<R, W> Session<R, W>
    where R: BufRead,
          W: Write
{
    /// Creates a running session. Nothing is written until [`Self::run`] or
    /// [`Self::step`] is called.
    pub const fn new(input: R, output: W) -> Self {
        Self { input,
               output,
               state: SessionState::Running }
    }

    /// Whether the session is still reading lines.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Prints the banner, then handles lines until the user exits or the
    /// input ends.
    ///
    /// # Errors
    /// Only I/O errors on the input or output end the loop early.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{BANNER}")?;
        while self.state == SessionState::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Prompts for, reads and answers a single line.
    ///
    /// At end of input a newline is written to finish the prompt and the
    /// session exits.
    pub fn step(&mut self) -> io::Result<SessionState> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            self.state = SessionState::Exited;
            return Ok(self.state);
        }

        match respond(&line) {
            Reply::Exit => self.state = SessionState::Exited,
            Reply::Message(message) => writeln!(self.output, "{message}")?,
        }
        self.output.flush()?;
        Ok(self.state)
    }

    /// Consumes the session and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_outcome() {
        assert_eq!(render(&Ok(3.5)), "Result: 3.5");
        assert_eq!(render(&Err(ParseError::UnbalancedParentheses { opening: 1, closing: 0 }.into())),
                   "Unmatched parentheses.");
        assert_eq!(render(&Err(ParseError::end_of_input().into())),
                   "Syntax Error: Please check your expression.");
        assert_eq!(render(&Err(ParseError::unsupported("name 'x'").into())),
                   "Calculation Error: Invalid or unsupported expression: name 'x'");
        assert_eq!(render(&Err(ParseError::TooDeeplyNested { limit: 512 }.into())),
                   "Calculation Error: Expression is too deeply nested.");
        assert_eq!(render(&Err(EvalError::TooDeeplyNested { limit: 512 }.into())),
                   "Calculation Error: Expression is too deeply nested.");
        assert_eq!(render(&Err(EvalError::DivisionByZero.into())),
                   "Division by zero is not allowed.");
        assert_eq!(render(&Err(EvalError::computation("Numerical result out of range").into())),
                   "Calculation Error: Numerical result out of range");
        assert_eq!(render(&Err(EvalError::Internal { details: "bad node".into() }.into())),
                   "An unexpected error occurred: Internal error: bad node");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(render(&Ok(-0.0)), "Result: 0");
        assert_eq!(respond("-0"), Reply::Message("Result: 0".into()));
        assert_eq!(respond("0 * -1"), Reply::Message("Result: 0".into()));
        assert_eq!(respond("-0.5"), Reply::Message("Result: -0.5".into()));
    }

    #[test]
    fn exit_ignores_case_and_whitespace() {
        assert_eq!(respond("exit"), Reply::Exit);
        assert_eq!(respond("\tExIt  "), Reply::Exit);
        assert_ne!(respond("exit()"), Reply::Exit);
    }

    #[test]
    fn blank_lines_are_syntax_errors() {
        assert_eq!(respond("   "),
                   Reply::Message("Syntax Error: Please check your expression.".into()));
    }
}
