/**
 * The command-line user interface for taking the quiz.
 */
use std::io;

use colored::*;
use serde::Serialize;

use super::common::Result;
use super::iohelper::{prettyprint, prettyprint_colored};
use super::quiz::{FeedbackView, QuestionView, Renderer};
use super::session::{AnswerRecord, QuizSummary};


const PROGRESS_BAR_WIDTH: usize = 20;


/// Machine-readable report printed after each quiz when `--json` is given.
#[derive(Serialize, Debug)]
struct Report<'a> {
    time_finished: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    summary: &'a QuizSummary,
    answers: &'a [AnswerRecord],
}


pub struct CmdUI<W: io::Write> {
    writer: W,
    json: bool,
}


impl<W: io::Write> CmdUI<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { writer, json }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn progress_bar(&mut self, progress: usize) -> Result<()> {
        let filled = progress.min(100) * PROGRESS_BAR_WIDTH / 100;
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_BAR_WIDTH - filled),
        );
        my_writeln!(self.writer, "  {} {}%", bar.cyan(), progress)
    }
}


impl<W: io::Write> Renderer for CmdUI<W> {
    fn question(&mut self, view: &QuestionView) -> Result<()> {
        my_write!(self.writer, "\n")?;
        my_writeln!(
            self.writer,
            "{}",
            format!("Question {} of {}", view.number, view.total).bright_blue()
        )?;
        self.progress_bar(view.progress)?;
        my_write!(self.writer, "\n")?;
        prettyprint_colored(&mut self.writer, view.text, "  ", None, Some(Color::Cyan))?;
        my_write!(self.writer, "\n")?;
        for (i, option) in view.options.iter().enumerate() {
            let prefix = format!("     ({}) ", i + 1);
            prettyprint(&mut self.writer, option, &prefix)?;
        }
        my_write!(self.writer, "\n")
    }

    fn feedback(&mut self, view: &FeedbackView) -> Result<()> {
        let correct_option = &view.options[view.correct_option];
        if view.correct {
            my_writeln!(self.writer, "{}", "Correct!".green())?;
        } else {
            let message = format!(
                "{} You chose {}. The correct answer was {}.",
                "Incorrect!".red(),
                view.options[view.selected],
                correct_option.green(),
            );
            prettyprint(&mut self.writer, &message, "")?;
        }

        if !view.explanation.is_empty() {
            my_write!(self.writer, "\n")?;
            prettyprint_colored(
                &mut self.writer, view.explanation, "  ", Some(Color::BrightBlack), None)?;
        }
        my_write!(self.writer, "\n")?;
        self.progress_bar(view.progress)?;
        my_writeln!(self.writer, "{}", "Press Enter to continue.".bright_black())
    }

    fn results(&mut self, summary: &QuizSummary, answers: &[AnswerRecord]) -> Result<()> {
        my_write!(self.writer, "\n\n")?;
        my_write!(self.writer, "Score: ")?;
        my_writeln!(
            self.writer, "{}", format!("{} / {}", summary.score, summary.total).cyan())?;
        my_write!(self.writer, "Percentage: ")?;
        my_writeln!(self.writer, "{}", format!("{}%", summary.percentage).cyan())?;
        my_writeln!(self.writer, "  {} correct", format!("{}", summary.score).green())?;
        my_writeln!(
            self.writer,
            "  {} incorrect",
            format!("{}", summary.total - summary.score).red()
        )?;

        if self.json {
            let report = Report {
                time_finished: chrono::Utc::now(),
                summary,
                answers,
            };
            my_writeln!(self.writer, "{}", serde_json::to_string(&report)?)?;
        }

        my_write!(self.writer, "\n")?;
        my_writeln!(
            self.writer, "{}", "Press Enter to play again, or q to quit.".bright_black())
    }

    fn hint(&mut self, text: &str) -> Result<()> {
        my_writeln!(self.writer, "{}", text)
    }
}
