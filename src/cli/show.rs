//! Preview command implementation (terminal display)

use std::process::ExitCode;

use crate::config::GeneratorConfig;
use crate::pipeline::{compile, read_input};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Print the rendered art of every glyph, or only the one at `index`
pub fn run_preview(config: &GeneratorConfig, index: Option<usize>) -> ExitCode {
    let compiled = match read_input(&config.input).and_then(|source| compile(&source, config)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let selected: Vec<_> = match index {
        Some(i) => match compiled.entries.get(i) {
            Some(entry) => vec![entry],
            None => {
                eprintln!(
                    "Error: No glyph at index {} (input has {})",
                    i,
                    compiled.entries.len()
                );
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => compiled.entries.iter().collect(),
    };

    for entry in selected {
        println!("{} ({})", entry.name.data, entry.name.method);
        println!("{}", entry.art);
        println!();
    }

    ExitCode::from(EXIT_SUCCESS)
}
