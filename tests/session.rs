use std::io::{self, Cursor, Write};

use safecalc::repl::{BANNER, PROMPT, Session, SessionState};

fn run_session(input: &str) -> String {
    let mut session = Session::new(Cursor::new(input.to_string()), Vec::new());
    session.run().unwrap();
    assert_eq!(session.state(), SessionState::Exited);
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn exit_ends_the_session() {
    let output = run_session("1 + 2\nexit\n3 + 4\n");
    assert_eq!(output,
               format!("{BANNER}\n{PROMPT}Result: 3\n{PROMPT}"));
}

#[test]
fn end_of_input_finishes_the_prompt_line() {
    let output = run_session("2 ^ 10\n");
    assert_eq!(output,
               format!("{BANNER}\n{PROMPT}Result: 1024\n{PROMPT}\n"));
}

#[test]
fn errors_do_not_end_the_session() {
    let output = run_session("1 / 0\n(1 + 2\n1 +\nx\n10 ^ 400\n7 / 2\nEXIT\n");
    let replies: Vec<&str> = output.lines()
                                   .skip(1)
                                   .map(|line| line.trim_start_matches(PROMPT))
                                   .collect();
    assert_eq!(replies,
               ["Division by zero is not allowed.",
                "Unmatched parentheses.",
                "Syntax Error: Please check your expression.",
                "Calculation Error: Invalid or unsupported expression: name 'x'",
                "Calculation Error: Numerical result out of range",
                "Result: 3.5",
                ""]);
}

#[test]
fn blank_and_padded_lines() {
    let output = run_session("\n   4 * 5   \n");
    assert_eq!(output,
               format!("{BANNER}\n{PROMPT}Syntax Error: Please check your expression.\n{PROMPT}Result: 20\n{PROMPT}\n"));
}

#[test]
fn step_reports_the_state() {
    let mut session = Session::new(Cursor::new("1\nexit\n"), Vec::new());
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.step().unwrap(), SessionState::Running);
    assert_eq!(session.step().unwrap(), SessionState::Exited);
    assert_eq!(String::from_utf8(session.into_output()).unwrap(),
               format!("{PROMPT}Result: 1\n{PROMPT}"));
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn output_failures_are_returned() {
    let mut session = Session::new(Cursor::new("1\n"), BrokenPipe);
    let err = session.run().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(session.state(), SessionState::Running);
}
