/**
 * Take a multiple-choice quiz from the command line.
 */
use colored::*;
use structopt::StructOpt;

use quickfire::common::{is_broken_pipe, Options};
use quickfire::shell;


fn main() {
    pretty_env_logger::init();
    let options = Options::from_args();

    if options.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = shell::main_take(options) {
        if !is_broken_pipe(&e) {
            eprintln!("{}: {}", "Error".red(), e);
            ::std::process::exit(2);
        }
    }
}
