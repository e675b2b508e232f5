//! Header scanning for `#define <PREFIX>_FRAME_*` declarations
//!
//! Icon exports carry their dimensions as preprocessor constants:
//!
//! ```text
//! #define ARROWS_FRAME_COUNT 2
//! #define ARROWS_FRAME_WIDTH 5
//! #define ARROWS_FRAME_HEIGHT 5
//! ```
//!
//! Width and height must both be present, numeric and equal. The frame count
//! is optional and only used to cross-check the number of extracted glyphs.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{IconError, Result};

fn define_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*#[ \t]*define[ \t]+\w*_FRAME_(WIDTH|HEIGHT|COUNT)\b[ \t]*([^\s/]*)")
            .expect("frame define pattern is valid")
    })
}

/// The whole input text plus the dimensions declared in its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet<'a> {
    /// Raw input text
    pub source: &'a str,
    /// Glyph width and height
    pub size: u32,
    /// Declared number of frames, if the export carries one
    pub frame_count: Option<u32>,
}

impl<'a> IconSet<'a> {
    /// Scan the header declarations of `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use monoglyph::header::IconSet;
    ///
    /// let text = "#define ICONS_FRAME_WIDTH 5\n#define ICONS_FRAME_HEIGHT 5\n";
    /// let set = IconSet::scan(text).unwrap();
    /// assert_eq!(set.size, 5);
    /// assert_eq!(set.frame_count, None);
    /// ```
    pub fn scan(source: &'a str) -> Result<Self> {
        let mut width = None;
        let mut height = None;
        let mut frame_count = None;

        for caps in define_pattern().captures_iter(source) {
            let kind = &caps[1];
            let raw = &caps[2];
            let slot = match kind {
                "WIDTH" => &mut width,
                "HEIGHT" => &mut height,
                _ => &mut frame_count,
            };
            if slot.is_some() {
                return Err(IconError::MalformedHeader(format!(
                    "duplicate _FRAME_{} declaration",
                    kind
                )));
            }
            *slot = Some(parse_value(kind, raw)?);
        }

        let width = width.ok_or_else(|| missing("WIDTH"))?;
        let height = height.ok_or_else(|| missing("HEIGHT"))?;

        if width != height {
            return Err(IconError::NonSquareGlyph { width, height });
        }
        if width == 0 {
            return Err(IconError::MalformedHeader("glyph size must be positive".to_string()));
        }

        Ok(Self { source, size: width, frame_count })
    }
}

fn missing(kind: &str) -> IconError {
    IconError::MalformedHeader(format!("no #define ..._FRAME_{} declaration found", kind))
}

fn parse_value(kind: &str, raw: &str) -> Result<u32> {
    raw.parse::<u32>().map_err(|_| {
        IconError::MalformedHeader(format!(
            "_FRAME_{} value '{}' is not a non-negative integer",
            kind, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_square_header() {
        let text = "#define NEW_PISKEL_FRAME_COUNT 3\n\
                    #define NEW_PISKEL_FRAME_WIDTH 8\n\
                    #define NEW_PISKEL_FRAME_HEIGHT 8\n";
        let set = IconSet::scan(text).unwrap();
        assert_eq!(set.size, 8);
        assert_eq!(set.frame_count, Some(3));
        assert_eq!(set.source, text);
    }

    #[test]
    fn test_non_square_fails() {
        let text = "#define A_FRAME_WIDTH 8\n#define A_FRAME_HEIGHT 9\n";
        let err = IconSet::scan(text).unwrap_err();
        assert!(matches!(err, IconError::NonSquareGlyph { width: 8, height: 9 }));
    }

    #[test]
    fn test_missing_height_fails() {
        let err = IconSet::scan("#define A_FRAME_WIDTH 8\n").unwrap_err();
        assert!(matches!(err, IconError::MalformedHeader(ref m) if m.contains("HEIGHT")));
    }

    #[test]
    fn test_missing_width_fails() {
        let err = IconSet::scan("#define A_FRAME_HEIGHT 8\n").unwrap_err();
        assert!(matches!(err, IconError::MalformedHeader(ref m) if m.contains("WIDTH")));
    }

    #[test]
    fn test_non_numeric_fails() {
        let text = "#define A_FRAME_WIDTH eight\n#define A_FRAME_HEIGHT 8\n";
        let err = IconSet::scan(text).unwrap_err();
        assert!(matches!(err, IconError::MalformedHeader(ref m) if m.contains("'eight'")));
    }

    #[test]
    fn test_empty_value_fails() {
        let text = "#define A_FRAME_WIDTH\n#define A_FRAME_HEIGHT 8\n";
        assert!(matches!(IconSet::scan(text), Err(IconError::MalformedHeader(_))));
    }

    #[test]
    fn test_zero_size_fails() {
        let text = "#define A_FRAME_WIDTH 0\n#define A_FRAME_HEIGHT 0\n";
        assert!(matches!(IconSet::scan(text), Err(IconError::MalformedHeader(_))));
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let text = "#define A_FRAME_WIDTH 5\n#define B_FRAME_WIDTH 5\n#define A_FRAME_HEIGHT 5\n";
        let err = IconSet::scan(text).unwrap_err();
        assert!(matches!(err, IconError::MalformedHeader(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn test_non_numeric_frame_count_fails() {
        let text = "#define A_FRAME_COUNT x\n#define A_FRAME_WIDTH 5\n#define A_FRAME_HEIGHT 5\n";
        assert!(matches!(IconSet::scan(text), Err(IconError::MalformedHeader(_))));
    }

    #[test]
    fn test_trailing_comment_after_value() {
        let text = "#define A_FRAME_WIDTH 6// w\n#define A_FRAME_HEIGHT 6/* h */\n";
        assert_eq!(IconSet::scan(text).unwrap().size, 6);
    }

    #[test]
    fn test_indented_define_and_tabs() {
        let text = "  #  define\tA_FRAME_WIDTH\t16\n#define A_FRAME_HEIGHT 16\n";
        assert_eq!(IconSet::scan(text).unwrap().size, 16);
    }

    #[test]
    fn test_other_defines_ignored() {
        let text = "#define A_FRAME_WIDTHS 3\n#define A_FRAME_WIDTH 4\n#define A_FRAME_HEIGHT 4\n";
        assert_eq!(IconSet::scan(text).unwrap().size, 4);
    }
}
