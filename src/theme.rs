// Source directory checks. Everything here only reads filesystem metadata so
// a bad source is rejected before any network traffic happens.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Marker file every theme directory must carry at its root.
pub const MANIFEST_FILE: &str = "manifest.cfg";

/// A validated theme source directory.
#[derive(Debug, Clone)]
pub struct ThemeSource {
    root: PathBuf,
    name: String,
}

impl ThemeSource {
    /// Confirm `path` is a directory holding `manifest.cfg` and derive the
    /// theme name from its final path component.
    pub fn open(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Theme source directory {} not found", path.display()))?;
        if !meta.is_dir() {
            bail!("Theme source {} is not a directory", path.display());
        }

        let manifest = path.join(MANIFEST_FILE);
        let is_file = std::fs::metadata(&manifest)
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            bail!("Theme manifest {} not found", manifest.display());
        }

        let name = theme_name(path)?;
        Ok(ThemeSource { root: path.to_path_buf(), name })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level folder name inside the archive, also the upload file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.name)
    }
}

/// `./mytheme/` and `mytheme` both yield `mytheme`; `.` and `..` resolve
/// through the canonical path.
fn theme_name(path: &Path) -> Result<String> {
    if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
        return Ok(name.to_string());
    }
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    match canonical.file_name().and_then(|s| s.to_str()) {
        Some(name) => Ok(name.to_string()),
        None => bail!("Cannot derive a theme name from {}", path.display()),
    }
}
