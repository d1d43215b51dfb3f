/**
 * The quiz controller: owns the session, the automatic-advance scheduler and the
 * renderer, and turns input lines and timer expiries into transitions.
 */
use log::{debug, info, trace};
use rand::rngs::StdRng;

use super::bank::{validate, Question};
use super::common::Result;
use super::scheduler::{ProgressionScheduler, Timer};
use super::session::{AnswerRecord, QuizSession, QuizState, QuizSummary, Transition};


/// What a question looks like on screen.
#[derive(Debug)]
pub struct QuestionView<'a> {
    /// One-based position of the question in the quiz.
    pub number: usize,
    pub total: usize,
    /// How far along the progress bar is, out of 100.
    pub progress: usize,
    pub text: &'a str,
    pub options: &'a [String],
}


/// What is shown once a question has been answered.
#[derive(Debug)]
pub struct FeedbackView<'a> {
    pub correct: bool,
    pub selected: usize,
    pub correct_option: usize,
    pub options: &'a [String],
    pub explanation: &'a str,
    pub progress: usize,
}


/// The presentation layer. The controller calls it with plain data and never reads
/// anything back.
pub trait Renderer {
    fn question(&mut self, view: &QuestionView) -> Result<()>;
    fn feedback(&mut self, view: &FeedbackView) -> Result<()>;
    fn results(&mut self, summary: &QuizSummary, answers: &[AnswerRecord]) -> Result<()>;
    fn hint(&mut self, text: &str) -> Result<()>;
}


/// A line of user input, interpreted.
#[derive(Debug, PartialEq, Eq)]
pub enum Key {
    /// A number typed by the user, as typed (options are numbered from 1).
    Number(usize),
    /// An empty line.
    Enter,
    Quit,
    Other,
}


pub fn parse_key(line: &str) -> Key {
    let line = line.trim();
    if line.is_empty() {
        Key::Enter
    } else if line == "q" || line == "quit" {
        Key::Quit
    } else if let Ok(n) = line.parse::<usize>() {
        Key::Number(n)
    } else {
        Key::Other
    }
}


#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Continue,
    Quit,
}


pub struct Quiz<R: Renderer, T: Timer> {
    bank: Vec<Question>,
    session: QuizSession,
    scheduler: ProgressionScheduler<T>,
    renderer: R,
    rng: StdRng,
}


impl<R: Renderer, T: Timer> Quiz<R, T> {
    pub fn new(
        bank: Vec<Question>, renderer: R, scheduler: ProgressionScheduler<T>, rng: StdRng
    ) -> Result<Self> {
        validate(&bank)?;
        Ok(Quiz { bank, session: QuizSession::new(), scheduler, renderer, rng })
    }

    /// Start a new playthrough, abandoning the current one if there is one.
    pub fn start(&mut self) -> Result<()> {
        self.scheduler.cancel();
        self.session.start(&self.bank, &mut self.rng)?;
        info!("quiz started");
        self.show_question()
    }

    /// Answer the current question with the option at `index`.
    pub fn select(&mut self, index: usize) -> Result<Transition> {
        if self.session.submit_answer(index)? == Transition::Ignored {
            return Ok(Transition::Ignored);
        }

        if let (Some(current), Some(q), Some(record)) = (
            self.session.current_index(),
            self.session.current_question(),
            self.session.answer_log().last(),
        ) {
            let total = self.session.total();
            let view = FeedbackView {
                correct: record.correct,
                selected: record.selected_option_index,
                correct_option: q.correct,
                options: &q.options,
                explanation: &q.explanation,
                progress: percent((current + 2).min(total), total),
            };
            self.renderer.feedback(&view)?;
            self.scheduler.arm(current);
        }
        Ok(Transition::Applied)
    }

    /// Skip the wait after an answer, or restart a finished quiz. Does nothing while a
    /// question is waiting to be answered.
    pub fn advance_now(&mut self) -> Result<()> {
        match self.session.state() {
            QuizState::AwaitingAdvance(_) => {
                self.scheduler.cancel();
                self.advance()
            },
            QuizState::Finished => {
                self.start()
            },
            state => {
                trace!("nothing to advance in state {:?}", state);
                Ok(())
            },
        }
    }

    /// Run the automatic advance if it has come due.
    pub fn tick(&mut self) -> Result<()> {
        if let Some(question) = self.scheduler.poll() {
            if self.session.state() == QuizState::AwaitingAdvance(question) {
                debug!("automatic advance past question {}", question);
                return self.advance();
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Command> {
        let key = parse_key(line);
        match key {
            Key::Quit => {
                self.scheduler.cancel();
                return Ok(Command::Quit);
            },
            Key::Enter => {
                self.advance_now()?;
            },
            Key::Number(n) => {
                if let Some(count) = self.answerable_option_count() {
                    if n >= 1 && n <= count {
                        self.select(n - 1)?;
                    } else {
                        self.option_hint(count)?;
                    }
                } else {
                    trace!("ignoring {:?} in state {:?}", key, self.session.state());
                }
            },
            Key::Other => {
                if let Some(count) = self.answerable_option_count() {
                    self.option_hint(count)?;
                }
            },
        }
        Ok(Command::Continue)
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// How long until the automatic advance is due, if one is pending.
    pub fn time_until_next(&self) -> Option<::std::time::Duration> {
        self.scheduler.time_until_next()
    }

    fn advance(&mut self) -> Result<()> {
        if self.session.advance() == Transition::Ignored {
            return Ok(());
        }

        if let Some(summary) = self.session.summarize() {
            info!(
                "quiz finished: {} of {} ({}%)",
                summary.score, summary.total, summary.percentage
            );
            self.renderer.results(&summary, self.session.answer_log())
        } else {
            self.show_question()
        }
    }

    fn show_question(&mut self) -> Result<()> {
        if let (Some(current), Some(q)) =
            (self.session.current_index(), self.session.current_question())
        {
            let total = self.session.total();
            let view = QuestionView {
                number: current + 1,
                total,
                progress: percent(current + 1, total),
                text: &q.text,
                options: &q.options,
            };
            self.renderer.question(&view)?;
        }
        Ok(())
    }

    /// The number of options of the current question, if it can be answered now.
    fn answerable_option_count(&self) -> Option<usize> {
        match self.session.state() {
            QuizState::InProgress(_) => self.session.current_question().map(|q| q.options.len()),
            _ => None,
        }
    }

    fn option_hint(&mut self, count: usize) -> Result<()> {
        self.renderer.hint(&format!("Please enter a number between 1 and {}.", count))
    }
}


fn percent(part: usize, total: usize) -> usize {
    if total > 0 {
        part * 100 / total
    } else {
        0
    }
}
