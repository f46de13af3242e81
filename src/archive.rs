// In-memory ZIP packaging of a theme directory. The whole archive is built in
// a `Vec<u8>`; nothing touches disk besides reading the source files.

use crate::theme::ThemeSource;
use anyhow::{bail, Context, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Finished archive bytes plus the number of files packed.
#[derive(Debug)]
pub struct ThemeArchive {
    pub bytes: Vec<u8>,
    pub file_count: usize,
}

/// Zip every regular file under the theme root, nested below a single
/// top-level folder named after the theme. The session cookie file is left
/// out when it sits inside the theme.
pub fn build(theme: &ThemeSource, cookie_file: &Path) -> Result<ThemeArchive> {
    let cookie_file = cookie_file.canonicalize().ok();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut file_count = 0;

    for entry in WalkDir::new(theme.root()).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", theme.root().display()))?;
        if entry.depth() > 0 && entry.file_type().is_symlink() {
            log::warn!("Skipping symlink {}", entry.path().display());
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        if cookie_file.is_some() && entry.path().canonicalize().ok() == cookie_file {
            log::debug!("Leaving session file {} out of the archive", entry.path().display());
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(theme.root())
            .with_context(|| format!("{} is outside the theme directory", entry.path().display()))?;
        let mut name = String::from(theme.name());
        for component in relative.components() {
            name.push('/');
            match component.as_os_str().to_str() {
                Some(part) => name.push_str(part),
                None => bail!("File name {} is not valid UTF-8", entry.path().display()),
            }
        }

        let data = std::fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", name))?;
        writer.write_all(&data).context("Failed to write archive entry")?;
        file_count += 1;
    }

    let bytes = writer.finish().context("Failed to finalize archive")?.into_inner();
    log::info!("Archived {} files from {} ({} bytes)", file_count, theme.root().display(), bytes.len());
    Ok(ThemeArchive { bytes, file_count })
}
