//! courtsprite - Command-line tool for drawing basketball player spritesheets

use std::process::ExitCode;

use courtsprite::cli;

fn main() -> ExitCode {
    cli::run()
}
