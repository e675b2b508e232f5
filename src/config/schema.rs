//! Configuration schema types for `monoglyph.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! conventional `icons-input.c` -> `src/icons/icons<size>.rs` setup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::naming::is_identifier;

/// Top-level generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// C source with the icon export
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Directory receiving `icons<size>.rs`
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub pixels: PixelsConfig,
    #[serde(default)]
    pub art: ArtConfig,
    #[serde(default)]
    pub emit: EmitConfig,
    /// Entry names, in glyph order
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            out_dir: default_out_dir(),
            pixels: PixelsConfig::default(),
            art: ArtConfig::default(),
            emit: EmitConfig::default(),
            names: Vec::new(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("icons-input.c")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("src/icons")
}

/// The two recognized pixel literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelsConfig {
    #[serde(default = "default_opaque")]
    pub opaque: String,
    #[serde(default = "default_transparent")]
    pub transparent: String,
}

impl Default for PixelsConfig {
    fn default() -> Self {
        Self { opaque: default_opaque(), transparent: default_transparent() }
    }
}

fn default_opaque() -> String {
    "0xff000000".to_string()
}

fn default_transparent() -> String {
    "0x00000000".to_string()
}

/// Characters used by the doc-comment art
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtConfig {
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_border")]
    pub border: String,
    #[serde(default = "default_blank")]
    pub blank: String,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self { marker: default_marker(), border: default_border(), blank: default_blank() }
    }
}

fn default_marker() -> String {
    "#".to_string()
}

fn default_border() -> String {
    "*".to_string()
}

fn default_blank() -> String {
    " ".to_string()
}

/// Shape of the generated declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Macro invoked by the generated file
    #[serde(default = "default_macro_name")]
    pub macro_name: String,
    /// Path imported with `use` at the top of the file
    #[serde(default = "default_macro_path")]
    pub macro_path: String,
    /// Visibility of the generated struct
    #[serde(default = "default_visibility")]
    pub visibility: String,
    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            macro_name: default_macro_name(),
            macro_path: default_macro_path(),
            visibility: default_visibility(),
            indent: default_indent(),
        }
    }
}

fn default_macro_name() -> String {
    "make_icon_set".to_string()
}

fn default_macro_path() -> String {
    "crate::make_icon_set".to_string()
}

fn default_visibility() -> String {
    "pub".to_string()
}

fn default_indent() -> usize {
    4
}

/// Validation error for a single config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "art.marker")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "monoglyph.toml: '{}' {}", self.field, self.message)
    }
}

impl GeneratorConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: &str| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        for (field, literal) in
            [("pixels.opaque", &self.pixels.opaque), ("pixels.transparent", &self.pixels.transparent)]
        {
            if literal.trim().is_empty() {
                push(field, "must be a non-empty literal");
            } else if literal.trim() != literal
                || literal.contains([',', '{', '}'])
                || literal.contains(char::is_whitespace)
            {
                push(field, "must not contain whitespace, ',' or braces");
            }
        }
        if self.pixels.opaque == self.pixels.transparent {
            push("pixels", "opaque and transparent literals must differ");
        }

        // A '/' next to a border '*' could close the comment early
        for (field, value) in
            [("art.marker", &self.art.marker), ("art.border", &self.art.border), ("art.blank", &self.art.blank)]
        {
            if value.chars().count() != 1 {
                push(field, "must be exactly one character");
            } else if value.contains(['/', '\n', '\r']) {
                push(field, "must not be '/' or a line break");
            }
        }

        if !is_identifier(&self.emit.macro_name) {
            push("emit.macro_name", "must be a Rust identifier");
        }
        if self.emit.macro_path.trim().is_empty() {
            push("emit.macro_path", "must be a non-empty path");
        }
        if self.emit.indent == 0 {
            push("emit.indent", "must be a positive integer");
        }

        let mut seen = HashSet::new();
        for (i, name) in self.names.iter().enumerate() {
            let field = format!("names[{}]", i);
            if !is_identifier(name) {
                push(&field, "must be a Rust identifier");
            } else if !seen.insert(name.as_str()) {
                push(&field, "duplicates an earlier name");
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
