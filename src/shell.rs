/**
 * The event loop that drives a quiz from the terminal.
 *
 * Input is read on a helper thread and forwarded over a channel; everything else,
 * including the quiz itself, stays on the calling thread, which waits for the next
 * line of input or for the automatic advance to come due, whichever is first.
 *
 * The reader thread is always blocked in `read_line` with its `> ` prompt already on
 * screen. A question shown by the automatic advance is therefore printed below that
 * prompt, and no new prompt appears until the next line has been read. Typing an answer
 * at that point still works; rustyline has no way to redraw a prompt from another
 * thread, so the old one is left as it is.
 */
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::bank;
use super::common::{Options, QuizError, Result};
use super::iohelper::MyReadline;
use super::quiz::{Command, Quiz, Renderer};
use super::scheduler::{ProgressionScheduler, SystemClock, Timer, TimerQueue};
use super::ui::CmdUI;


#[derive(Debug)]
pub enum Input {
    Line(String),
    Eof,
    Interrupted,
    Failed,
}


/// The main function for taking the quiz at the terminal.
pub fn main_take(options: Options) -> Result<()> {
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let delay = Duration::from_millis(options.delay_ms);
    let scheduler = ProgressionScheduler::new(TimerQueue::new(SystemClock::new()), delay);
    let ui = CmdUI::new(io::stdout(), options.json);
    let mut quiz = Quiz::new(bank::question_bank(), ui, scheduler, rng)?;

    let inputs = spawn_reader(|| rustyline::Editor::<()>::new());
    run(&mut quiz, &inputs)
}


/// Read lines with the reader built by `make_reader` on a new thread, and send them
/// down the returned channel. The thread stops after end of input or an error.
pub fn spawn_reader<F, R>(make_reader: F) -> Receiver<Input>
where
    F: FnOnce() -> R + Send + 'static,
    R: MyReadline,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut reader = make_reader();
        loop {
            let input = match reader.read_line("> ") {
                Ok(line) => Input::Line(line),
                Err(QuizError::ReadlineEof) => Input::Eof,
                Err(QuizError::ReadlineInterrupted) => Input::Interrupted,
                Err(_) => Input::Failed,
            };
            let last = match input {
                Input::Line(_) => false,
                _ => true,
            };
            if sender.send(input).is_err() || last {
                break;
            }
        }
    });
    receiver
}


/// Start `quiz` and feed it input and timer expiries until the user quits or input
/// runs out.
pub fn run<R: Renderer, T: Timer>(quiz: &mut Quiz<R, T>, inputs: &Receiver<Input>) -> Result<()> {
    quiz.start()?;
    loop {
        let input = match quiz.time_until_next() {
            Some(wait) => match inputs.recv_timeout(wait) {
                Ok(input) => Some(input),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => Some(Input::Eof),
            },
            None => Some(inputs.recv().unwrap_or(Input::Eof)),
        };

        // An advance that came due while input was arriving goes first.
        quiz.tick()?;

        match input {
            None => {},
            Some(Input::Line(line)) => {
                if quiz.handle_line(&line)? == Command::Quit {
                    info!("quit requested");
                    break;
                }
            },
            Some(Input::Eof) | Some(Input::Interrupted) => {
                debug!("input closed");
                break;
            },
            Some(Input::Failed) => {
                return Err(QuizError::ReadlineOther);
            },
        }
    }
    Ok(())
}
