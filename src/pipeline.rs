//! End-to-end compilation: header -> glyphs -> packed rows + art -> document
//!
//! [`compile`] is pure and runs every validating stage. [`run`] adds the two
//! filesystem touches: reading the input and writing the output. Any error
//! from `compile` therefore aborts before the output directory is touched.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::emit::{build_document, output_path, write_document, Entry, OutputDocument};
use crate::error::{FsStep, IconError, Result};
use crate::glyph::{extract_glyphs, Glyph};
use crate::header::IconSet;
use crate::naming::entry_names;
use crate::packer::{pack_glyph, PackLayout};
use crate::render::render_glyph;

/// Everything produced from one input text
#[derive(Debug, Clone)]
pub struct CompiledIcons {
    pub layout: PackLayout,
    /// `_FRAME_COUNT` from the header, if declared
    pub frame_count: Option<u32>,
    pub glyphs: Vec<Glyph>,
    pub entries: Vec<Entry>,
    pub document: OutputDocument,
}

impl CompiledIcons {
    pub fn size(&self) -> u32 {
        self.layout.size
    }
}

/// Outcome of a full [`run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub size: u32,
    pub glyph_count: usize,
    pub output: PathBuf,
    pub archived: Option<PathBuf>,
}

/// Run every stage except the filesystem write.
pub fn compile(source: &str, config: &GeneratorConfig) -> Result<CompiledIcons> {
    let set = IconSet::scan(source)?;
    let layout = PackLayout::new(set.size);
    info!(
        "Glyph size {}x{}; pad zero: {}; data width in byte: {}",
        set.size, set.size, layout.padding, layout.data_width
    );

    let glyphs = extract_glyphs(&set, &config.pixels)?;
    info!("Found {} glyph(s)", glyphs.len());
    if glyphs.is_empty() {
        warn!("No pixel blocks found; the generated icon set will be empty");
    }
    if let Some(declared) = set.frame_count {
        if declared as usize != glyphs.len() {
            warn!(
                "Header declares {} frame(s) but {} glyph block(s) were found",
                declared,
                glyphs.len()
            );
        }
    }

    let names = entry_names(glyphs.len(), &config.names);
    let entries = glyphs
        .iter()
        .zip(names)
        .map(|(glyph, name)| -> Result<Entry> {
            Ok(Entry {
                name,
                art: render_glyph(glyph, &layout, &config.art),
                rows: pack_glyph(glyph, &layout)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let document = build_document(set.size, &entries, &config.emit);

    Ok(CompiledIcons { layout, frame_count: set.frame_count, glyphs, entries, document })
}

/// Read the configured input file.
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| IconError::fs(FsStep::Read, path, e))
}

/// Read, compile and write, archiving any previous output for this size.
pub fn run(config: &GeneratorConfig) -> Result<RunReport> {
    run_at(config, &Utc::now())
}

/// [`run`] with an explicit clock, used for archival names.
pub fn run_at(config: &GeneratorConfig, now: &DateTime<Utc>) -> Result<RunReport> {
    let source = read_input(&config.input)?;
    let compiled = compile(&source, config)?;

    let target = output_path(&config.out_dir, compiled.size());
    let outcome = write_document(&target, &compiled.document, now)?;

    Ok(RunReport {
        size: compiled.size(),
        glyph_count: compiled.glyphs.len(),
        output: outcome.path,
        archived: outcome.archived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    const X: &str = "0xff000000";
    const O: &str = "0x00000000";

    fn source(size: u32, glyphs: &[&str]) -> String {
        let blocks: Vec<String> = glyphs
            .iter()
            .map(|bits| {
                let tokens: Vec<&str> = bits.chars().map(|c| if c == '1' { X } else { O }).collect();
                format!("{{\n{}\n}}", tokens.join(", "))
            })
            .collect();
        format!(
            "#define T_FRAME_COUNT {count}\n#define T_FRAME_WIDTH {size}\n#define T_FRAME_HEIGHT {size}\n\
             static const uint32_t t_data[{count}][{n}] = {{\n{body}\n}};\n",
            count = glyphs.len(),
            n = size * size,
            body = blocks.join(",\n")
        )
    }

    fn config_in(temp: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            input: temp.path().join("icons-input.c"),
            out_dir: temp.path().join("src/icons"),
            ..Default::default()
        }
    }

    #[test]
    fn test_compile_small() {
        let compiled = compile(&source(4, &["1010010110100101"]), &GeneratorConfig::default())
            .unwrap();
        assert_eq!(compiled.size(), 4);
        assert_eq!(compiled.layout.padding, 4);
        assert_eq!(compiled.frame_count, Some(1));
        assert_eq!(compiled.entries[0].rows[0].to_string(), "0b10100000");
        assert_eq!(compiled.entries[0].rows[1].to_string(), "0b01010000");
        assert!(compiled.document.text.contains("pub Icons4: 4 {"));
        assert!(compiled.document.text.contains("Icon0: icon_0 = &["));
    }

    #[test]
    fn test_compile_preserves_order() {
        let config = GeneratorConfig {
            names: vec!["Full".into(), "Empty".into(), "Half".into()],
            ..Default::default()
        };
        let compiled =
            compile(&source(2, &["1111", "0000", "1100"]), &config).unwrap();
        let text = &compiled.document.text;
        let full = text.find("Full: full").unwrap();
        let empty = text.find("Empty: empty").unwrap();
        let half = text.find("Half: half").unwrap();
        assert!(full < empty && empty < half);
    }

    #[test]
    fn test_compile_row_packing_error() {
        let bits = "0".repeat(144);
        let err = compile(&source(12, &[&bits]), &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, IconError::RowPacking { row_width: 12, data_width: 8, .. }));
    }

    #[test]
    fn test_compile_frame_count_mismatch_is_not_fatal() {
        let text = source(1, &["1"]).replace("T_FRAME_COUNT 1", "T_FRAME_COUNT 4");
        let compiled = compile(&text, &GeneratorConfig::default()).unwrap();
        assert_eq!(compiled.glyphs.len(), 1);
        assert_eq!(compiled.frame_count, Some(4));
    }

    #[test]
    fn test_run_writes_output() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        fs::write(&config.input, source(8, &[&"1".repeat(64)])).unwrap();

        let report = run(&config).unwrap();
        assert_eq!(report.size, 8);
        assert_eq!(report.glyph_count, 1);
        assert_eq!(report.output, temp.path().join("src/icons/icons8.rs"));
        assert_eq!(report.archived, None);

        let text = fs::read_to_string(&report.output).unwrap();
        assert_eq!(text.matches("0b11111111").count(), 8);
    }

    #[test]
    fn test_run_twice_archives_once_per_rerun() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        fs::write(&config.input, source(2, &["1000"])).unwrap();
        let first = run_at(&config, &now).unwrap();
        assert_eq!(first.archived, None);

        fs::write(&config.input, source(2, &["0001", "1111"])).unwrap();
        let second = run_at(&config, &now).unwrap();
        let third = run_at(&config, &now).unwrap();

        let a = second.archived.unwrap();
        let b = third.archived.unwrap();
        assert_ne!(a, b);

        let entries = fs::read_dir(temp.path().join("src/icons")).unwrap().count();
        assert_eq!(entries, 3);

        let latest = fs::read_to_string(&third.output).unwrap();
        assert!(latest.contains("Icon1: icon_1"));
        assert!(fs::read_to_string(&a).unwrap().contains("0b10000000"));
    }

    #[test]
    fn test_run_invalid_input_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        let text = source(2, &["1000"]).replacen(X, "0x12345678", 1);
        fs::write(&config.input, text).unwrap();

        let err = run(&config).unwrap_err();
        assert!(matches!(err, IconError::InvalidPixelToken { ref token, .. } if token == "0x12345678"));
        assert!(!temp.path().join("src").exists());
    }

    #[test]
    fn test_run_invalid_input_keeps_previous_output() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        fs::create_dir_all(&config.out_dir).unwrap();
        let previous = config.out_dir.join("icons2.rs");
        fs::write(&previous, "previous").unwrap();
        fs::write(&config.input, "#define T_FRAME_WIDTH 2\n#define T_FRAME_HEIGHT 3\n").unwrap();

        assert!(matches!(run(&config), Err(IconError::NonSquareGlyph { .. })));
        assert_eq!(fs::read_to_string(&previous).unwrap(), "previous");
        assert_eq!(fs::read_dir(&config.out_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_run_missing_input() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        let err = run(&config).unwrap_err();
        assert!(matches!(err, IconError::Filesystem { step: FsStep::Read, .. }));
    }
}
