// Session cookie persistence. The cookie file holds the `Cookie` header the
// jar would send to the destination, e.g. `__ac=abc; I18N_LANGUAGE=en`.

use anyhow::{Context, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use std::path::Path;

/// Install cookies from `path` into `jar`, scoped to `destination`.
/// A missing or unreadable file leaves the jar untouched. Returns how many
/// cookies were installed.
pub fn load(jar: &Jar, path: &Path, destination: &Url) -> usize {
    let stored = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("No stored session at {}: {}", path.display(), e);
            return 0;
        }
    };

    let mut installed = 0;
    for pair in stored.split(';').map(str::trim).filter(|p| p.contains('=')) {
        jar.add_cookie_str(pair, destination);
        installed += 1;
    }
    log::debug!("Loaded {} stored cookies from {}", installed, path.display());
    installed
}

/// Cookie header the jar currently holds for `destination`, if any.
pub fn cookie_string(jar: &Jar, destination: &Url) -> Option<String> {
    jar.cookies(destination)
        .and_then(|v| v.to_str().ok().map(String::from))
        .filter(|s| !s.is_empty())
}

/// Overwrite `path` with the given cookie header.
pub fn save(path: &Path, cookies: &str) -> Result<()> {
    std::fs::write(path, cookies)
        .with_context(|| format!("Failed to write session file {}", path.display()))?;
    log::debug!("Stored session in {}", path.display());
    Ok(())
}
