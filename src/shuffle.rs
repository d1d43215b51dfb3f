/**
 * Randomize the order in which questions, and the options within each question, are
 * presented.
 */
use rand::Rng;

use super::bank::{validate, Question};
use super::common::{QuizError, Result};


/// Return a uniformly random permutation of `items`, leaving `items` untouched.
///
/// This is the Fisher-Yates shuffle: walking down from the last index, each position
/// is swapped with a position drawn uniformly from the ones at or before it.
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}


/// Shuffle the order of the questions in `bank`, and the options of each question.
///
/// The correct option is followed by its text, not its position: after the options are
/// shuffled, the new correct index is the option whose text matches. `bank` is checked
/// with `validate` first, so that text is always present and never ambiguous.
pub fn randomize<R: Rng>(bank: &[Question], rng: &mut R) -> Result<Vec<Question>> {
    validate(bank)?;

    shuffle(bank, rng)
        .into_iter()
        .map(|q| -> Result<Question> {
            let options = shuffle(&q.options, rng);
            let correct = options
                .iter()
                .position(|o| o == q.correct_option())
                .ok_or_else(|| QuizError::MalformedQuestion {
                    text: q.text.clone(),
                    reason: "correct option lost while shuffling",
                })?;
            Ok(Question { options, correct, ..q })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use super::super::bank::question_bank;

    #[test]
    fn shuffle_leaves_input_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = vec![1, 2, 3, 4, 5];
        let mut output = shuffle(&input, &mut rng);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);

        output.sort();
        assert_eq!(output, input);
    }

    #[test]
    fn shuffle_handles_empty_and_singleton() {
        let mut rng = StdRng::seed_from_u64(2);
        let empty: Vec<u32> = Vec::new();
        assert_eq!(shuffle(&empty, &mut rng), empty);
        assert_eq!(shuffle(&["only"], &mut rng), vec!["only"]);
    }

    #[test]
    fn shuffle_is_uniform_over_permutations() {
        let mut rng = StdRng::seed_from_u64(3);
        let trials = 60_000;
        let mut counts = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffle(&['a', 'b', 'c'], &mut rng)).or_insert(0) += 1;
        }

        // Each of the 3! permutations should come up about 10,000 times; the standard
        // deviation is under 100.
        assert_eq!(counts.len(), 6);
        for (permutation, count) in counts.iter() {
            assert!(
                (9_400..=10_600).contains(count),
                "{:?} came up {} times", permutation, count
            );
        }
    }

    #[test]
    fn randomize_preserves_questions_and_correct_answers() {
        let bank = question_bank();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..50 {
            let randomized = randomize(&bank, &mut rng).unwrap();
            assert_eq!(randomized.len(), bank.len());

            let mut texts: Vec<&str> = randomized.iter().map(|q| q.text.as_str()).collect();
            let mut expected: Vec<&str> = bank.iter().map(|q| q.text.as_str()).collect();
            texts.sort();
            expected.sort();
            assert_eq!(texts, expected);

            for q in randomized.iter() {
                let original = bank.iter().find(|b| b.text == q.text).unwrap();
                assert_eq!(q.correct_option(), original.correct_option());
                assert_eq!(q.explanation, original.explanation);

                let mut options = q.options.clone();
                let mut original_options = original.options.clone();
                options.sort();
                original_options.sort();
                assert_eq!(options, original_options);
            }
        }
    }

    #[test]
    fn randomize_moves_the_correct_index() {
        let bank = question_bank();
        let mut rng = StdRng::seed_from_u64(5);

        // Over many runs the correct option of the first bank question must land in
        // every position at least once.
        let mut positions = [false; 4];
        for _ in 0..200 {
            for q in randomize(&bank, &mut rng).unwrap().iter() {
                if q.text == bank[0].text {
                    positions[q.correct] = true;
                }
            }
        }
        assert!(positions.iter().all(|seen| *seen));
    }

    #[test]
    fn randomize_single_question_bank() {
        let bank = vec![
            Question::new("2 + 2?", &["3", "4", "5", "6"], 1, "Basic addition."),
        ];
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..20 {
            let randomized = randomize(&bank, &mut rng).unwrap();
            assert_eq!(randomized.len(), 1);

            let q = &randomized[0];
            assert_eq!(q.text, "2 + 2?");
            assert_eq!(q.explanation, "Basic addition.");
            assert_eq!(q.correct_option(), "4");

            let mut options = q.options.clone();
            options.sort();
            assert_eq!(options, vec!["3", "4", "5", "6"]);
        }
    }

    #[test]
    fn randomize_rejects_bad_correct_index() {
        let bank = vec![Question::new("2 + 2?", &["3", "4", "5", "6"], 9, "")];
        let mut rng = StdRng::seed_from_u64(7);
        match randomize(&bank, &mut rng) {
            Err(QuizError::MalformedQuestion { .. }) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn randomize_rejects_empty_bank() {
        let mut rng = StdRng::seed_from_u64(8);
        match randomize(&[], &mut rng) {
            Err(QuizError::EmptyQuiz) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
