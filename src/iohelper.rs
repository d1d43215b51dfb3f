/**
 * Helper functions for input and output.
 */
use std::io;

use colored::*;
use rustyline::error::ReadlineError;

use super::common::{QuizError, Result};


#[macro_export]
macro_rules! my_writeln {
    ($dst:expr, $($arg:tt)*) => (
        writeln!($dst, $($arg)*).map_err($crate::common::QuizError::Io)
    );
}


#[macro_export]
macro_rules! my_write {
    ($dst:expr, $($arg:tt)*) => (
        write!($dst, $($arg)*).map_err($crate::common::QuizError::Io)
    );
}


/// A source of input lines. Implemented for `rustyline::Editor`, and by canned input in
/// tests.
pub trait MyReadline {
    /// Read one line, without its trailing newline. Ctrl+C and Ctrl+D are reported as
    /// `QuizError::ReadlineInterrupted` and `QuizError::ReadlineEof` respectively.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}


impl<H: rustyline::Helper> MyReadline for rustyline::Editor<H> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self.readline(&format!("{}", prompt.white())) {
            Ok(s) => Ok(s),
            Err(ReadlineError::Interrupted) => Err(QuizError::ReadlineInterrupted),
            Err(ReadlineError::Eof) => Err(QuizError::ReadlineEof),
            _ => Err(QuizError::ReadlineOther),
        }
    }
}


/// Print `message` to `writer`, breaking lines according to the current width of the
/// terminal. Prepend `prefix` to the first line and indent all subsequent lines by its
/// length.
pub fn prettyprint<W: io::Write>(writer: &mut W, message: &str, prefix: &str) -> Result<()> {
    prettyprint_colored(writer, message, prefix, None, None)
}


pub fn prettyprint_colored<W: io::Write>(
    writer: &mut W,
    message: &str,
    prefix: &str,
    message_color: Option<Color>,
    prefix_color: Option<Color>,
) -> Result<()> {
    let width = textwrap::termwidth().saturating_sub(prefix.len()).max(20);
    let mut lines = textwrap::wrap_iter(message, width);

    if let Some(first_line) = lines.next() {
        let colored_prefix = color_optional(prefix, prefix_color);
        let colored_line = color_optional(&first_line, message_color);
        my_writeln!(writer, "{}{}", colored_prefix, colored_line)?;
    }

    let indent = " ".repeat(prefix.len());
    for line in lines {
        let colored_line = color_optional(&line, message_color);
        my_writeln!(writer, "{}{}", indent, colored_line)?;
    }
    Ok(())
}


fn color_optional(text: &str, color: Option<Color>) -> ColoredString {
    if let Some(color) = color {
        text.color(color)
    } else {
        text.normal()
    }
}
