/**
 * The state of one playthrough of a quiz, and the transitions between questions.
 *
 * A `QuizSession` is the single source of truth for which question is showing, whether
 * an answer may be submitted, and whether the quiz is over. Transitions that are not
 * valid in the current state are ignored rather than treated as errors, since they can
 * only come from repeated or stale input.
 */
use log::{debug, trace};
use rand::Rng;
use serde::Serialize;

use super::bank::Question;
use super::common::{QuizError, Result};
use super::shuffle;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    /// The question at this index is showing and has not been answered.
    InProgress(usize),
    /// The question at this index has been answered and the next one has not loaded.
    AwaitingAdvance(usize),
    Finished,
}


/// Whether a transition changed the session or was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}


/// Represents the answer given to one question.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_option_index: usize,
    pub correct: bool,
}


/// The final tally of a finished quiz.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    /// `score / total` as a whole percentage, rounded half up.
    pub percentage: usize,
}


#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    state: QuizState,
    score: usize,
    answer_log: Vec<AnswerRecord>,
}


impl QuizSession {
    pub fn new() -> Self {
        QuizSession {
            questions: Vec::new(),
            state: QuizState::NotStarted,
            score: 0,
            answer_log: Vec::new(),
        }
    }

    /// Begin a new playthrough with a freshly randomized copy of `bank`. Valid from any
    /// state; whatever was recorded before is discarded.
    ///
    /// A bank that `bank::validate` rejects is returned as an error and the session is
    /// left as it was.
    pub fn start<R: Rng>(&mut self, bank: &[Question], rng: &mut R) -> Result<()> {
        let questions = shuffle::randomize(bank, rng)?;

        *self = QuizSession {
            questions,
            state: QuizState::InProgress(0),
            score: 0,
            answer_log: Vec::new(),
        };
        debug!("started quiz with {} questions", self.questions.len());
        Ok(())
    }

    /// Record `selected` as the answer to the current question.
    ///
    /// Ignored unless the current question is still unanswered. An index that is not an
    /// option of the current question is rejected without changing anything.
    pub fn submit_answer(&mut self, selected: usize) -> Result<Transition> {
        let index = match self.state {
            QuizState::InProgress(index) => index,
            state => {
                trace!("ignoring answer {} in state {:?}", selected, state);
                return Ok(Transition::Ignored);
            }
        };

        let record = evaluate(&self.questions[index], index, selected)?;
        if record.correct {
            self.score += 1;
        }
        debug!(
            "question {} answered with option {} ({})",
            index,
            selected,
            if record.correct { "correct" } else { "incorrect" }
        );
        self.answer_log.push(record);
        self.state = QuizState::AwaitingAdvance(index);
        Ok(Transition::Applied)
    }

    /// Move past an answered question, to the next question or to the end of the quiz.
    pub fn advance(&mut self) -> Transition {
        match self.state {
            QuizState::AwaitingAdvance(index) => {
                if index + 1 < self.questions.len() {
                    self.state = QuizState::InProgress(index + 1);
                } else {
                    self.state = QuizState::Finished;
                }
                debug!("advanced from question {} to {:?}", index, self.state);
                Transition::Applied
            },
            state => {
                trace!("ignoring advance in state {:?}", state);
                Transition::Ignored
            }
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    /// Index of the question showing, or `None` before the start and after the end.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            QuizState::InProgress(index) | QuizState::AwaitingAdvance(index) => Some(index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|index| &self.questions[index])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    /// Return the final tally, or `None` if the quiz has not finished.
    pub fn summarize(&self) -> Option<QuizSummary> {
        if self.is_finished() {
            Some(summarize(self.score, self.total()))
        } else {
            None
        }
    }
}


/// Judge `selected` as an answer to `question`, which sits at `question_index` in the
/// session.
pub fn evaluate(
    question: &Question, question_index: usize, selected: usize
) -> Result<AnswerRecord> {
    let count = question.options.len();
    if selected >= count {
        return Err(QuizError::InvalidInput { index: selected, count });
    }

    Ok(AnswerRecord {
        question_index,
        selected_option_index: selected,
        correct: selected == question.correct,
    })
}


/// Tally `score` out of `total`. The percentage is rounded half up; a quiz with no
/// questions scores 0%.
pub fn summarize(score: usize, total: usize) -> QuizSummary {
    let percentage = if total > 0 {
        (200 * score + total) / (2 * total)
    } else {
        0
    };
    QuizSummary { score, total, percentage }
}
