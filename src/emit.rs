//! Generated document assembly and the archive-then-write side effect

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::EmitConfig;
use crate::error::{FsStep, IconError, Result};
use crate::naming::EntryName;
use crate::packer::PackedRow;
use crate::render::RenderedGlyph;

/// Timestamp layout used in archival names (ISO-8601, whole seconds)
pub const ARCHIVE_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

/// One glyph ready for emission
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: EntryName,
    pub art: RenderedGlyph,
    pub rows: Vec<PackedRow>,
}

/// The generated source text for one glyph size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub size: u32,
    pub text: String,
}

/// Result of [`write_document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Path of the freshly written document
    pub path: PathBuf,
    /// Where the previous document went, if there was one
    pub archived: Option<PathBuf>,
}

/// Name of the generated struct, e.g. `Icons5`
pub fn struct_name(size: u32) -> String {
    format!("Icons{}", size)
}

/// Target path for a glyph size: `<out_dir>/icons<size>.rs`
pub fn output_path(out_dir: &Path, size: u32) -> PathBuf {
    out_dir.join(format!("icons{}.rs", size))
}

/// Assemble the macro invocation for all entries, in order.
pub fn build_document(size: u32, entries: &[Entry], emit: &EmitConfig) -> OutputDocument {
    let unit = " ".repeat(emit.indent);
    let ind2 = unit.repeat(2);
    let ind3 = unit.repeat(3);

    let body = entries
        .iter()
        .map(|entry| {
            let rows = entry
                .rows
                .iter()
                .map(|row| format!("{}{}", ind3, row))
                .collect::<Vec<_>>()
                .join(",\n");
            format!(
                "{}\n{}{}: {} = &[\n{}\n{}]",
                entry.art.indented(&ind2),
                ind2,
                entry.name.data,
                entry.name.method,
                rows,
                ind2
            )
        })
        .collect::<Vec<_>>()
        .join(",\n\n");

    let mut text = String::new();
    text.push_str(&format!("use {};\n\n", emit.macro_path));
    text.push_str(&format!("{}! {{\n", emit.macro_name));
    text.push_str(&format!("{}{} {}: {} {{\n", unit, emit.visibility, struct_name(size), size));
    if !body.is_empty() {
        text.push_str(&body);
        text.push('\n');
    }
    text.push_str(&format!("{}}}\n}}\n", unit));

    OutputDocument { size, text }
}

/// Archival name for `target` at `now`:
/// `<stem>_<YYYY-MM-DDTHH:MM:SS>.old.<ext>` in the same directory.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use monoglyph::emit::archive_path;
/// use std::path::{Path, PathBuf};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(
///     archive_path(Path::new("src/icons/icons5.rs"), &now),
///     PathBuf::from("src/icons/icons5_2024-03-09T14:05:07.old.rs"),
/// );
/// ```
pub fn archive_path(target: &Path, now: &DateTime<Utc>) -> PathBuf {
    archive_candidate(target, &now.format(ARCHIVE_TIMESTAMP).to_string())
}

fn archive_candidate(target: &Path, stamp: &str) -> PathBuf {
    let stem = target.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match target.extension() {
        Some(ext) => format!("{}_{}.old.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}.old", stem, stamp),
    };
    target.with_file_name(name)
}

/// First archival name for `target` that does not exist yet.
///
/// Two runs within the same second would share a timestamp, so later ones
/// get `-1`, `-2`, ... appended to it.
pub fn free_archive_path(target: &Path, now: &DateTime<Utc>) -> PathBuf {
    let stamp = now.format(ARCHIVE_TIMESTAMP).to_string();
    let mut candidate = archive_candidate(target, &stamp);
    let mut n = 1;
    while candidate.exists() {
        candidate = archive_candidate(target, &format!("{}-{}", stamp, n));
        n += 1;
    }
    candidate
}

/// Write `document` to `target`, archiving any file already there.
///
/// The steps run strictly in order:
/// 1. if `target` exists, rename it to its archival name (abort on failure,
///    leaving it untouched);
/// 2. create the parent directory if needed;
/// 3. create `target` fresh and write the document.
///
/// A failure in step 2 or 3 after a successful archive leaves the old file
/// archived and no current output; it is reported, never ignored. A write
/// that fails partway removes the partial file.
pub fn write_document(
    target: &Path,
    document: &OutputDocument,
    now: &DateTime<Utc>,
) -> Result<WriteOutcome> {
    write_document_with(target, document, now, create_fresh)
}

fn create_fresh(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

fn write_document_with<W, F>(
    target: &Path,
    document: &OutputDocument,
    now: &DateTime<Utc>,
    open: F,
) -> Result<WriteOutcome>
where
    W: Write,
    F: FnOnce(&Path) -> io::Result<W>,
{
    let archived = archive_existing(target, now)?;
    ensure_parent(target)?;
    write_fresh(target, document, open)?;

    info!("Wrote {} ({} bytes)", target.display(), document.text.len());

    Ok(WriteOutcome { path: target.to_path_buf(), archived })
}

/// Rename an existing `target` out of the way; `None` when there was none.
fn archive_existing(target: &Path, now: &DateTime<Utc>) -> Result<Option<PathBuf>> {
    if !target.exists() {
        return Ok(None);
    }
    let archive = free_archive_path(target, now);
    fs::rename(target, &archive).map_err(|e| IconError::fs(FsStep::Archive, target, e))?;
    info!("Icons with same size already exist; archived to {}", archive.display());
    Ok(Some(archive))
}

fn ensure_parent(target: &Path) -> Result<()> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| IconError::fs(FsStep::CreateDir, parent, e))
        }
        _ => Ok(()),
    }
}

fn write_fresh<W, F>(target: &Path, document: &OutputDocument, open: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&Path) -> io::Result<W>,
{
    let mut sink = open(target).map_err(|e| IconError::fs(FsStep::Write, target, e))?;
    let written = sink.write_all(document.text.as_bytes()).and_then(|()| sink.flush());
    drop(sink);

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(target) {
            warn!("Could not remove partial output {}: {}", target.display(), cleanup);
        }
        return Err(IconError::fs(FsStep::Write, target, e));
    }
    Ok(())
}
