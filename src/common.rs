/**
 * Definitions used by several modules: the `QuizError` type and the struct that holds
 * the command-line arguments.
 */
use std::error;
use std::fmt;
use std::io;

use structopt::StructOpt;


pub type Result<T> = ::std::result::Result<T, QuizError>;


#[derive(Debug)]
pub enum QuizError {
    /// An option index outside of `0..count` reached the core.
    InvalidInput { index: usize, count: usize },
    /// For when the question bank has no questions at all.
    EmptyQuiz,
    /// For when a question in the bank breaks one of its invariants.
    MalformedQuestion { text: String, reason: &'static str },
    /// For JSON errors.
    Json(serde_json::Error),
    Io(io::Error),
    ReadlineInterrupted,
    ReadlineEof,
    ReadlineOther,
}


impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            QuizError::InvalidInput { index, count } => {
                write!(f, "option {} is out of range for a question with {} options",
                    index + 1, count)
            },
            QuizError::EmptyQuiz => {
                write!(f, "no questions found")
            },
            QuizError::MalformedQuestion { ref text, reason } => {
                write!(f, "malformed question '{}': {}", text, reason)
            },
            QuizError::Json(ref err) => {
                write!(f, "could not serialize JSON ({})", err)
            },
            QuizError::Io(ref err) => {
                write!(f, "IO error ({})", err)
            },
            QuizError::ReadlineInterrupted => {
                Ok(())
            },
            QuizError::ReadlineEof => {
                Ok(())
            },
            QuizError::ReadlineOther => {
                write!(f, "error while reading input")
            },
        }
    }
}


impl error::Error for QuizError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            QuizError::Json(ref err) => Some(err),
            QuizError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}


impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}


impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Json(err)
    }
}


pub fn is_broken_pipe(e: &QuizError) -> bool {
    if let QuizError::Io(e) = e {
        if let io::ErrorKind::BrokenPipe = e.kind() {
            return true;
        }
    }
    false
}


/// Holds the command-line configuration for the application.
#[derive(StructOpt, Debug)]
#[structopt(name = "quickfire", about = "Take a multiple-choice quiz from the command line.")]
pub struct Options {
    /// Do not emit colorized output.
    #[structopt(long = "no-color")]
    pub no_color: bool,
    /// Milliseconds to wait after an answer before moving on automatically.
    #[structopt(long = "delay-ms", default_value = "2000")]
    pub delay_ms: u64,
    /// Seed the random number generator, for a reproducible question order.
    #[structopt(long = "seed")]
    pub seed: Option<u64>,
    /// Print a JSON report after each finished quiz.
    #[structopt(long = "json")]
    pub json: bool,
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use super::super::scheduler::DEFAULT_DELAY;

    #[test]
    fn invalid_input_message_is_one_based() {
        let err = QuizError::InvalidInput { index: 4, count: 4 };
        assert_eq!(
            format!("{}", err), "option 5 is out of range for a question with 4 options");
    }

    #[test]
    fn readline_errors_print_nothing() {
        assert_eq!(format!("{}", QuizError::ReadlineInterrupted), "");
        assert_eq!(format!("{}", QuizError::ReadlineEof), "");
    }

    #[test]
    fn broken_pipe_is_detected() {
        let err = QuizError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(is_broken_pipe(&err));
        assert!(!is_broken_pipe(&QuizError::EmptyQuiz));
    }

    #[test]
    fn default_options_match_command_line_defaults() {
        let parsed = Options::from_iter(&["quickfire"]);
        assert_eq!(Duration::from_millis(parsed.delay_ms), DEFAULT_DELAY);
        assert_eq!(parsed.seed, None);
        assert!(!parsed.no_color && !parsed.json);
    }

    #[test]
    fn can_parse_all_options() {
        let parsed = Options::from_iter(
            &["quickfire", "--no-color", "--delay-ms", "50", "--seed", "7", "--json"]);
        assert!(parsed.no_color);
        assert_eq!(parsed.delay_ms, 50);
        assert_eq!(parsed.seed, Some(7));
        assert!(parsed.json);
    }
}
