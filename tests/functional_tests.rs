use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;
use std::time;

use regex::Regex;


#[test]
fn can_take_whole_quiz() {
    let stdout = play_quiz(&[], &answer_every_question("1"));

    assert_in_order(&stdout, &[
        "Question 1 of 5",
        "(1) ",
        "(4) ",
        "Press Enter to continue.",
        "Question 2 of 5",
        "Question 3 of 5",
        "Question 4 of 5",
        "Question 5 of 5",
        "[####################] 100%",
        "Score: ",
        "Percentage: ",
        "Press Enter to play again, or q to quit.",
    ]);

    let score = captured_number(&stdout, r"Score: (\d+) / 5");
    let percentage = captured_number(&stdout, r"Percentage: (\d+)%");
    assert_eq!(percentage, score * 20);
    assert_eq!(stdout.matches("Correct!").count(), score);
    assert_eq!(stdout.matches("Incorrect!").count(), 5 - score);
}


#[test]
fn every_question_is_asked_once() {
    let stdout = play_quiz(&[], &answer_every_question("2"));

    for question in &[
        "What is the capital of France?",
        "Which planet is known as the Red Planet?",
        "What is 2 + 2?",
        "Which programming language is known as the 'language of the web'?",
        "What is the largest ocean on Earth?",
    ] {
        assert_eq!(stdout.matches(question).count(), 1, "{:?} in {:?}", question, stdout);
    }
}


#[test]
fn out_of_range_answers_get_a_hint() {
    let stdout = play_quiz(&[], &["5", "Paris", "0"]);

    assert_eq!(stdout.matches("Please enter a number between 1 and 4.").count(), 3);
    assert!(!stdout.contains("Correct!"));
    assert!(!stdout.contains("Incorrect!"));
}


#[test]
fn answering_twice_is_scored_once() {
    let stdout = play_quiz(&[], &["1", "1", "2"]);

    let feedback = stdout.matches("Correct!").count() + stdout.matches("Incorrect!").count();
    assert_eq!(feedback, 1);
}


#[test]
fn quiz_advances_automatically() {
    let mut child = spawn(&["--delay-ms", "50"]);
    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        for _ in 0..5 {
            stdin_write(stdin, "3");
            sleep(500);
        }
    }

    let stdout = finish(child);
    assert_in_order(&stdout, &[
        "Question 1 of 5",
        "Question 2 of 5",
        "Question 3 of 5",
        "Question 4 of 5",
        "Question 5 of 5",
        "Score: ",
    ]);
}


#[test]
fn enter_restarts_finished_quiz() {
    let mut input = answer_every_question("4");
    input.push("");
    let stdout = play_quiz(&[], &input);

    assert_in_order(&stdout, &["Question 5 of 5", "Score: ", "Question 1 of 5"]);
    assert_eq!(stdout.matches("Question 1 of 5").count(), 2);
}


#[test]
fn can_quit_midway() {
    let stdout = play_quiz(&[], &["1", "q", "", "1"]);

    assert!(stdout.contains("Question 1 of 5"));
    assert!(!stdout.contains("Question 2 of 5"));
    assert!(!stdout.contains("Score: "));
}


#[test]
fn seeded_quizzes_are_reproducible() {
    let input = answer_every_question("1");
    let first = play_quiz(&["--seed", "42"], &input);
    let second = play_quiz(&["--seed", "42"], &input);
    assert_eq!(first, second);
}


#[test]
fn can_print_json_report() {
    let stdout = play_quiz(&["--json"], &answer_every_question("1"));

    let re = Regex::new(
        r#"^\{"time_finished":"[^"]+","score":\d,"total":5,"percentage":\d+,"answers":\[.*\]\}$"#
    ).unwrap();
    assert!(
        stdout.lines().any(|line| re.is_match(line.trim())),
        "No JSON report in {:?}", stdout
    );
}


fn answer_every_question(answer: &'static str) -> Vec<&'static str> {
    let mut input = Vec::new();
    for _ in 0..5 {
        input.push(answer);
        input.push("");
    }
    input
}

fn captured_number(stdout: &str, pattern: &str) -> usize {
    let re = Regex::new(pattern).unwrap();
    let captures = re
        .captures(stdout)
        .unwrap_or_else(|| panic!("Failed to match {:?} in {:?}", pattern, stdout));
    captures[1].parse().unwrap()
}

fn assert_in_order(stdout: &str, data: &[&str]) {
    let mut last_pos = 0;
    for datum in data {
        if let Some(pos) = stdout[last_pos..].find(datum) {
            // `pos` is an index into the slice `stdout[last_pos..]`, so it must be offset
            // by `last_pos` to be an index into `stdout`.
            last_pos = (pos + last_pos) + datum.len();
        } else {
            panic!("Missing: {:?}; Contents of stdout: {:?}", datum, stdout);
        }
    }
}

fn play_quiz(extra_args: &[&str], input: &[&str]) -> String {
    let mut child = spawn(extra_args);
    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        for line in input {
            stdin_write(stdin, line);
        }
    }
    finish(child)
}

fn finish(child: Child) -> String {
    let result = child.wait_with_output().expect("Failed to read stdout");
    assert!(
        result.status.success(),
        "Exited with {:?}: {}", result.status, String::from_utf8_lossy(&result.stderr)
    );
    String::from_utf8_lossy(&result.stdout).to_string()
}

fn spawn(extra_args: &[&str]) -> Child {
    Command::new(env!("CARGO_BIN_EXE_quickfire"))
        .arg("--no-color")
        .args(extra_args)
        .env_remove("RUST_LOG")
        .env_remove("TERM")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn child process")
}

fn stdin_write(stdin: &mut ChildStdin, line: &str) {
    stdin.write_all(line.as_bytes()).expect("Failed to write to stdin");
    stdin.write_all("\n".as_bytes()).expect("Failed to write to stdin");
}

fn sleep(millis: u64) {
    thread::sleep(time::Duration::from_millis(millis))
}
