//! Check command implementation (validate without writing)

use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::GeneratorConfig;
use crate::emit::{output_path, struct_name};
use crate::pipeline::{compile, read_input, CompiledIcons};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// What a build would produce
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub input: PathBuf,
    pub size: u32,
    pub data_width: u32,
    pub padding: u32,
    pub glyphs: usize,
    pub frame_count: Option<u32>,
    pub struct_name: String,
    pub output: PathBuf,
    /// Whether a build would archive an existing file
    pub would_archive: bool,
}

impl CheckSummary {
    fn new(config: &GeneratorConfig, compiled: &CompiledIcons) -> Self {
        let output = output_path(&config.out_dir, compiled.size());
        Self {
            input: config.input.clone(),
            size: compiled.size(),
            data_width: compiled.layout.data_width,
            padding: compiled.layout.padding,
            glyphs: compiled.glyphs.len(),
            frame_count: compiled.frame_count,
            struct_name: struct_name(compiled.size()),
            would_archive: output.exists(),
            output,
        }
    }
}

/// Run the check command
pub fn run_check(config: &GeneratorConfig, json: bool) -> ExitCode {
    let compiled = match read_input(&config.input).and_then(|source| compile(&source, config)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let summary = CheckSummary::new(config, &compiled);

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: Failed to serialize summary: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("Input:      {}", summary.input.display());
        println!("Size:       {}x{} ({})", summary.size, summary.size, summary.struct_name);
        println!(
            "Packing:    {} data bits + {} padding bits per byte",
            summary.data_width, summary.padding
        );
        match summary.frame_count {
            Some(n) => println!("Glyphs:     {} (header declares {})", summary.glyphs, n),
            None => println!("Glyphs:     {}", summary.glyphs),
        }
        let note = if summary.would_archive { " (existing file would be archived)" } else { "" };
        println!("Output:     {}{}", summary.output.display(), note);
    }

    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fields() {
        let text = "#define A_FRAME_WIDTH 1\n#define A_FRAME_HEIGHT 1\n{0xff000000}{0x00000000}";
        let config = GeneratorConfig::default();
        let compiled = compile(text, &config).unwrap();
        let summary = CheckSummary::new(&config, &compiled);
        assert_eq!(summary.size, 1);
        assert_eq!(summary.data_width, 1);
        assert_eq!(summary.padding, 7);
        assert_eq!(summary.glyphs, 2);
        assert_eq!(summary.frame_count, None);
        assert_eq!(summary.struct_name, "Icons1");
        assert_eq!(summary.output, PathBuf::from("src/icons/icons1.rs"));

        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["glyphs"], 2);
        assert_eq!(json["frame_count"], serde_json::Value::Null);
    }
}
