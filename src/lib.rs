/*!
 * A timed multiple-choice quiz for the terminal.
 *
 * The questions come from a fixed bank and are shuffled, along with their options, each
 * time the quiz starts. After each answer the quiz shows whether it was right and moves
 * on after a short delay, or straight away if the user presses Enter.
 */
#[macro_use]
pub mod iohelper;
pub mod bank;
pub mod common;
pub mod quiz;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod shuffle;
pub mod ui;
