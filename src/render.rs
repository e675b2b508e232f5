//! Text-art previews of glyphs for the generated doc comments
//!
//! A 5x5 glyph (padding 3) renders as:
//!
//! ```text
//! /*************
//!  *     #     *
//!  *    #      *
//!  *   #####   *
//!  *    #      *
//!  *     #     *
//!  *************/
//! ```

use std::fmt;

use crate::config::ArtConfig;
use crate::glyph::Glyph;
use crate::packer::PackLayout;

/// Rendered comment block, one entry per output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGlyph {
    lines: Vec<String>,
}

impl RenderedGlyph {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines prefixed with `indent`, newline separated
    pub fn indented(&self, indent: &str) -> String {
        self.lines.iter().map(|line| format!("{}{}", indent, line)).collect::<Vec<_>>().join("\n")
    }
}

impl fmt::Display for RenderedGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.indented(""))
    }
}

/// Render a glyph as a bordered block comment.
///
/// Each interior line holds `padding` blank cells on both sides of the
/// pixels, so the frame is as wide as a padded byte plus the border.
pub fn render_glyph(glyph: &Glyph, layout: &PackLayout, art: &ArtConfig) -> RenderedGlyph {
    let pad = layout.padding as usize;
    let run: String = art.border.repeat(glyph.size() as usize + pad * 2 + 1);
    let side = art.blank.repeat(pad);

    let mut lines = Vec::with_capacity(glyph.rows().len() + 2);
    lines.push(format!("/*{}", run));
    for row in glyph.rows() {
        let pixels: String =
            row.iter().map(|&on| if on { art.marker.as_str() } else { art.blank.as_str() }).collect();
        lines.push(format!(" {}{}{}{}{}", art.border, side, pixels, side, art.border));
    }
    lines.push(format!(" {}*/", run));

    RenderedGlyph { lines }
}
