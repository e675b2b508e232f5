//! Error taxonomy for the icon compilation pipeline
//!
//! Every stage returns [`IconError`]. Parsing and validation variants abort
//! the run before anything touches the output directory; [`IconError::Filesystem`]
//! is the only variant the emitter can produce.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which filesystem step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsStep {
    /// Reading the input file
    Read,
    /// Renaming the previous output to its archival name
    Archive,
    /// Creating the output directory
    CreateDir,
    /// Writing the generated document
    Write,
}

impl fmt::Display for FsStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FsStep::Read => "read",
            FsStep::Archive => "archive",
            FsStep::CreateDir => "create-dir",
            FsStep::Write => "write",
        };
        f.write_str(name)
    }
}

/// Error raised by any stage of the pipeline
#[derive(Debug, Error)]
pub enum IconError {
    /// A `_FRAME_WIDTH`/`_FRAME_HEIGHT`/`_FRAME_COUNT` declaration is missing or not numeric
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Declared width and height differ
    #[error("icons must be square-sized, got icons {width}x{height}")]
    NonSquareGlyph { width: u32, height: u32 },

    /// A pixel literal is neither the opaque nor the transparent constant
    #[error(
        "invalid pixel token '{token}' in glyph {glyph} (line {line}), expected '{opaque}' or '{transparent}'"
    )]
    InvalidPixelToken {
        token: String,
        glyph: usize,
        line: usize,
        opaque: String,
        transparent: String,
    },

    /// A block has the wrong number of pixels, or the brace structure is broken
    #[error("malformed glyph: {0}")]
    MalformedGlyph(String),

    /// A row cannot be split into whole byte-sized chunks
    #[error("glyph {glyph}: row of {row_width} pixels cannot be packed in chunks of {data_width}")]
    RowPacking { glyph: usize, row_width: u32, data_width: u32 },

    /// Reading, archiving or writing failed
    #[error("failed to {step} '{}': {source}", .path.display())]
    Filesystem {
        step: FsStep,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IconError {
    pub(crate) fn fs(step: FsStep, path: impl Into<PathBuf>, source: io::Error) -> Self {
        IconError::Filesystem { step, path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, IconError>;
