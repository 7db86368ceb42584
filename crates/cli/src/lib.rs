use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod commands;

/// Default output root when `--out` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default path written by `init-config`.
pub const DEFAULT_CONFIG_PATH: &str = "asset-salvage.json";

/// Absolute output root for `--out`.
///
/// An existing directory is canonicalized. The root is normally created by
/// the first run, so a path that does not exist yet is taken as-is when
/// absolute and joined onto the working directory otherwise.
pub fn resolve_output_root(out: &str) -> Result<PathBuf> {
    let path = Path::new(out);
    if let Ok(existing) = path.canonicalize() {
        return Ok(existing);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

/// Log filter directive for a `-v` count.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
