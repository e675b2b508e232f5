//! Monoglyph - Command-line tool for compiling C bitmap icon exports

use std::process::ExitCode;

use monoglyph::cli;

fn main() -> ExitCode {
    cli::run()
}
