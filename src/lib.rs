//! Monoglyph - Compile C bitmap icon exports into packed Rust icon sets
//!
//! This library provides functionality to:
//! - Scan `#define <PREFIX>_FRAME_WIDTH/HEIGHT` headers for the glyph size
//! - Extract monochrome glyphs from C initializer blocks
//! - Pack glyph rows into byte-aligned binary literals
//! - Render text-art previews for doc comments
//! - Emit an `icons<size>.rs` macro invocation, archiving previous output

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod glyph;
pub mod header;
pub mod naming;
pub mod packer;
pub mod pipeline;
pub mod render;
pub mod tokenizer;

pub use error::{IconError, Result};
