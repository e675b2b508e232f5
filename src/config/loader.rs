//! Locating and reading `monoglyph.toml`
//!
//! The file is optional. Without one, every setting takes its default and
//! paths are relative to the working directory; with one, paths inside it
//! are relative to the directory holding it. Command-line flags win over both.

use super::schema::GeneratorConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE: &str = "monoglyph.toml";

/// Why a configuration could not be produced
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file exists (or was named explicitly) but could not be read
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Not valid TOML, or a key has the wrong type
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Well-formed, but some settings are unusable for generation
    #[error("unusable settings:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// `--input`
    pub input: Option<PathBuf>,
    /// `--out-dir`
    pub out_dir: Option<PathBuf>,
    /// `--opaque`
    pub opaque: Option<String>,
    /// `--transparent`
    pub transparent: Option<String>,
}

/// Nearest `monoglyph.toml` at or above the working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(|cwd| find_config_from(&cwd))
}

/// Nearest `monoglyph.toml` at or above `start`.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE)).find(|candidate| candidate.is_file())
}

/// Build the generator settings.
///
/// An explicit `path` must be readable. Without one the nearest
/// `monoglyph.toml` is used, and [`GeneratorConfig::default`] when none
/// exists. `input` and `out_dir` from a file are anchored at its directory,
/// so running from a subdirectory of the project writes to the same place.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
    let Some(file) = path.map(Path::to_path_buf).or_else(find_config) else {
        return Ok(GeneratorConfig::default());
    };

    let mut config = read_config_file(&file)?;
    if let Some(dir) = config_dir(&file) {
        config.input = resolve_path(dir, &config.input);
        config.out_dir = resolve_path(dir, &config.out_dir);
    }
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    checked(toml::from_str(&text)?)
}

fn checked(config: GeneratorConfig) -> Result<GeneratorConfig, ConfigError> {
    let problems: Vec<String> = config.validate().iter().map(ToString::to_string).collect();
    if problems.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Validation(problems))
    }
}

/// Apply command-line values on top of `config`.
///
/// The result is checked again: a flag can make the two pixel literals equal.
pub fn merge_cli_overrides(
    mut config: GeneratorConfig,
    overrides: &CliOverrides,
) -> Result<GeneratorConfig, ConfigError> {
    if let Some(input) = &overrides.input {
        config.input.clone_from(input);
    }
    if let Some(out_dir) = &overrides.out_dir {
        config.out_dir.clone_from(out_dir);
    }
    if let Some(opaque) = &overrides.opaque {
        config.pixels.opaque.clone_from(opaque);
    }
    if let Some(transparent) = &overrides.transparent {
        config.pixels.transparent.clone_from(transparent);
    }
    checked(config)
}

/// Directory that relative paths in `config_file` are anchored at.
pub fn config_dir(config_file: &Path) -> Option<&Path> {
    config_file.parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// `path` anchored at `base` unless it is already absolute.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
