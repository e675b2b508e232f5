//! Glyph extraction from innermost pixel blocks

use log::debug;

use crate::config::PixelsConfig;
use crate::error::{IconError, Result};
use crate::header::IconSet;
use crate::tokenizer::{scan_blocks, split_tokens};

/// One icon's pixel grid, `size` rows of `size` pixels (true = opaque)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Position in the input, 0-based
    pub index: usize,
    /// Line of the block's opening brace
    pub line: usize,
    rows: Vec<Vec<bool>>,
}

impl Glyph {
    /// Build a glyph from a flat, row-major pixel list.
    ///
    /// Fails with [`IconError::MalformedGlyph`] unless there are exactly
    /// `size * size` pixels.
    pub fn from_pixels(index: usize, line: usize, size: u32, pixels: Vec<bool>) -> Result<Self> {
        let size = size as usize;
        let expected = size * size;
        if size == 0 || pixels.len() != expected {
            return Err(IconError::MalformedGlyph(format!(
                "glyph {} (line {}) has {} pixels, expected {} ({}x{})",
                index,
                line,
                pixels.len(),
                expected,
                size,
                size
            )));
        }
        let rows = pixels.chunks(size).map(<[bool]>::to_vec).collect();
        Ok(Self { index, line, rows })
    }

    /// Pixel rows, top to bottom
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn size(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// Extract every glyph from the icon set, in source order.
pub fn extract_glyphs(set: &IconSet<'_>, pixels: &PixelsConfig) -> Result<Vec<Glyph>> {
    let blocks = scan_blocks(set.source)?;
    let mut glyphs = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.iter().enumerate() {
        debug!("glyph {}: block at line {}", index, block.line);
        let values = split_tokens(&block.body)
            .into_iter()
            .map(|token| classify(token, index, block.line, pixels))
            .collect::<Result<Vec<bool>>>()?;
        glyphs.push(Glyph::from_pixels(index, block.line, set.size, values)?);
    }

    Ok(glyphs)
}

fn classify(token: &str, glyph: usize, line: usize, pixels: &PixelsConfig) -> Result<bool> {
    if token == pixels.opaque {
        Ok(true)
    } else if token == pixels.transparent {
        Ok(false)
    } else {
        Err(IconError::InvalidPixelToken {
            token: token.to_string(),
            glyph,
            line,
            opaque: pixels.opaque.clone(),
            transparent: pixels.transparent.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: &str = "0xff000000";
    const O: &str = "0x00000000";

    fn icon_set(size: u32, body: &str) -> String {
        format!(
            "#define T_FRAME_WIDTH {size}\n#define T_FRAME_HEIGHT {size}\n\
             static const uint32_t t_data[1][{n}] = {{\n{body}\n}};\n",
            n = size * size
        )
    }

    fn extract(text: &str) -> Result<Vec<Glyph>> {
        let set = IconSet::scan(text).unwrap();
        extract_glyphs(&set, &PixelsConfig::default())
    }

    #[test]
    fn test_extract_single_glyph() {
        let text = icon_set(2, &format!("{{{X}, {O},\n{O}, {X}}}"));
        let glyphs = extract(&text).unwrap();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].rows(), &[vec![true, false], vec![false, true]]);
        assert_eq!(glyphs[0].size(), 2);
        assert_eq!(glyphs[0].line, 4);
    }

    #[test]
    fn test_extract_preserves_order() {
        let body = format!("{{{X}, {X}, {X}, {X}}},\n{{{O}, {O}, {O}, {O}}},\n{{{X}, {O}, {O}, {X}}}");
        let glyphs = extract(&icon_set(2, &body)).unwrap();
        let firsts: Vec<bool> = glyphs.iter().map(|g| g.rows()[0][0]).collect();
        assert_eq!(firsts, vec![true, false, true]);
        let indices: Vec<usize> = glyphs.iter().map(|g| g.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_invalid_token() {
        let text = icon_set(2, &format!("{{{X}, 0x12345678, {O}, {O}}}"));
        let err = extract(&text).unwrap_err();
        match err {
            IconError::InvalidPixelToken { token, glyph, .. } => {
                assert_eq!(token, "0x12345678");
                assert_eq!(glyph, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_token() {
        let text = icon_set(2, &format!("{{{X}, {O}, {O}}}"));
        let err = extract(&text).unwrap_err();
        assert!(matches!(err, IconError::MalformedGlyph(ref m) if m.contains("has 3 pixels")));
    }

    #[test]
    fn test_extra_token() {
        let text = icon_set(2, &format!("{{{X}, {O}, {O}, {O}, {X}}}"));
        assert!(matches!(extract(&text), Err(IconError::MalformedGlyph(_))));
    }

    #[test]
    fn test_empty_block_is_invalid_token() {
        let text = icon_set(2, "{}");
        let err = extract(&text).unwrap_err();
        assert!(matches!(err, IconError::InvalidPixelToken { ref token, .. } if token.is_empty()));
    }

    #[test]
    fn test_trailing_separator_allowed() {
        let text = icon_set(1, &format!("{{ {X}, }}"));
        let glyphs = extract(&text).unwrap();
        assert_eq!(glyphs[0].rows(), &[vec![true]]);
    }

    #[test]
    fn test_custom_literals() {
        let text = icon_set(1, "{ON},{OFF}").replace("[1][1]", "[2][1]");
        let set = IconSet::scan(&text).unwrap();
        let pixels = PixelsConfig { opaque: "ON".to_string(), transparent: "OFF".to_string() };
        let glyphs = extract_glyphs(&set, &pixels).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert!(glyphs[0].rows()[0][0]);
        assert!(!glyphs[1].rows()[0][0]);
    }

    #[test]
    fn test_literal_match_is_exact() {
        let text = icon_set(1, "{0xFF000000}");
        assert!(matches!(extract(&text), Err(IconError::InvalidPixelToken { .. })));
    }
}
