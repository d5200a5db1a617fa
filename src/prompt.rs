use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::drain::Prompter;

/// Asks on stderr and reads the answer from stdin.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        ask_with(&mut io::stdin().lock(), &mut io::stderr(), question)
    }
}

fn ask_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{} {} ", "??".blue().bold(), question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer on standard input",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
