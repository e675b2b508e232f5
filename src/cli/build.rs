//! Build command implementation

use std::process::ExitCode;

use crate::config::GeneratorConfig;
use crate::pipeline;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Run the build command: compile the input and write `icons<size>.rs`
pub fn run_build(config: &GeneratorConfig) -> ExitCode {
    match pipeline::run(config) {
        Ok(report) => {
            if let Some(ref archived) = report.archived {
                println!("Archived: {}", archived.display());
            }
            println!(
                "Saved: {} ({} icons, {}x{})",
                report.output.display(),
                report.glyph_count,
                report.size,
                report.size
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
