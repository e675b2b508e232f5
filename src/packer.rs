//! Bit packing of glyph rows into byte literals
//!
//! A row is cut left to right into chunks of `data_width = min(8, size)`
//! pixels. Each chunk becomes one byte, high bit first, with
//! `padding = 8 - data_width` zero bits appended. Icons narrower than a byte
//! therefore still spend one whole byte per row.

use std::fmt;

use crate::error::{IconError, Result};
use crate::glyph::Glyph;

/// Packing geometry derived from the glyph size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLayout {
    pub size: u32,
    /// Pixels stored per byte
    pub data_width: u32,
    /// Zero bits appended after each chunk
    pub padding: u32,
}

impl PackLayout {
    /// # Examples
    ///
    /// ```
    /// use monoglyph::packer::PackLayout;
    ///
    /// let layout = PackLayout::new(4);
    /// assert_eq!((layout.data_width, layout.padding), (4, 4));
    ///
    /// let layout = PackLayout::new(16);
    /// assert_eq!((layout.data_width, layout.padding), (8, 0));
    /// ```
    pub fn new(size: u32) -> Self {
        Self { size, data_width: size.min(8), padding: 8u32.saturating_sub(size) }
    }

    /// Bytes produced per pixel row, when the row divides evenly
    pub fn bytes_per_row(&self) -> u32 {
        self.size / self.data_width.max(1)
    }
}

/// One pixel row as a sequence of padded bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRow {
    bytes: Vec<u8>,
}

impl PackedRow {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Binary literal tokens, e.g. `0b10100000`
    pub fn literals(&self) -> Vec<String> {
        self.bytes.iter().map(|b| format!("0b{:08b}", b)).collect()
    }
}

impl fmt::Display for PackedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literals().join(", "))
    }
}

/// Pack a single pixel row.
///
/// `glyph` is only used to label the error.
pub fn pack_row(row: &[bool], layout: &PackLayout, glyph: usize) -> Result<PackedRow> {
    let data_width = layout.data_width as usize;
    if data_width == 0 || row.len() % data_width != 0 {
        return Err(IconError::RowPacking {
            glyph,
            row_width: row.len() as u32,
            data_width: layout.data_width,
        });
    }

    let bytes = row
        .chunks(data_width)
        .map(|chunk| {
            let bits = chunk.iter().fold(0u8, |acc, &on| (acc << 1) | u8::from(on));
            bits << layout.padding
        })
        .collect();

    Ok(PackedRow { bytes })
}

/// Pack every row of a glyph, top to bottom.
pub fn pack_glyph(glyph: &Glyph, layout: &PackLayout) -> Result<Vec<PackedRow>> {
    glyph.rows().iter().map(|row| pack_row(row, layout, glyph.index)).collect()
}
