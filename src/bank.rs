/**
 * The built-in question bank and the checks every bank must pass before a quiz can be
 * taken from it.
 */
use std::collections::HashSet;

use super::common::{QuizError, Result};


/// Every question in a bank has exactly this many options.
pub const OPTION_COUNT: usize = 4;


/// Represents a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    /// The options in the order they are presented. Option text must be unique within
    /// a question, since the correct option is tracked by its text when the options
    /// are reordered.
    pub options: Vec<String>,
    /// Index into `options` of the single correct option.
    pub correct: usize,
    /// Shown after the question has been answered, whether correctly or not.
    pub explanation: String,
}


impl Question {
    pub fn new(text: &str, options: &[&str], correct: usize, explanation: &str) -> Self {
        Question {
            text: String::from(text),
            options: options.iter().map(|o| String::from(*o)).collect(),
            correct,
            explanation: String::from(explanation),
        }
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }
}


/// Return the questions that ship with the application.
pub fn question_bank() -> Vec<Question> {
    vec![
        Question::new(
            "What is the capital of France?",
            &["London", "Berlin", "Paris", "Madrid"],
            2,
            "Paris is the capital and largest city of France. It has been the capital \
             since 987 AD and is one of the world's major cultural and commercial \
             centers.",
        ),
        Question::new(
            "Which planet is known as the Red Planet?",
            &["Venus", "Mars", "Jupiter", "Saturn"],
            1,
            "Mars is called the Red Planet because of the iron oxide (rust) on its \
             surface, which gives it a reddish appearance. It's the fourth planet from \
             the Sun.",
        ),
        Question::new(
            "What is 2 + 2?",
            &["3", "4", "5", "6"],
            1,
            "The sum of 2 and 2 equals 4. This is basic arithmetic addition.",
        ),
        Question::new(
            "Which programming language is known as the 'language of the web'?",
            &["Python", "Java", "JavaScript", "C++"],
            2,
            "JavaScript is the primary programming language of the web. It runs in web \
             browsers and enables interactive web pages. It's supported by all modern \
             browsers.",
        ),
        Question::new(
            "What is the largest ocean on Earth?",
            &["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
            3,
            "The Pacific Ocean is the largest and deepest ocean on Earth, covering \
             approximately 63 million square miles (165 million square kilometers) and \
             containing more than half of the world's free water.",
        ),
    ]
}


/// Check that `questions` can be used for a quiz: there is at least one question, and
/// each question has `OPTION_COUNT` distinct options and a correct index in range.
pub fn validate(questions: &[Question]) -> Result<()> {
    if questions.is_empty() {
        return Err(QuizError::EmptyQuiz);
    }

    for q in questions.iter() {
        let reason = if q.options.len() != OPTION_COUNT {
            Some("wrong number of options")
        } else if q.correct >= q.options.len() {
            Some("correct option out of range")
        } else if !all_distinct(&q.options) {
            Some("duplicate options")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(QuizError::MalformedQuestion { text: q.text.clone(), reason });
        }
    }
    Ok(())
}


fn all_distinct(options: &[String]) -> bool {
    let mut seen = HashSet::new();
    options.iter().all(|o| seen.insert(o.as_str()))
}
