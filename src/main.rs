//! Spritespin - command-line tool for rotating and flipping palette-indexed bitmaps

use std::process::ExitCode;

use spritespin::cli;

fn main() -> ExitCode {
    cli::run()
}
