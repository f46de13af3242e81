// Terminal interaction: the credential prompt shown when the site asks for a
// login, and a spinner while the archive goes over the wire.

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Fill in whatever was not supplied through flags or the environment.
pub fn credentials(login: Option<&str>, password: Option<&str>) -> Result<Credentials> {
    let login = match login {
        Some(l) => l.to_string(),
        None => Input::new()
            .with_prompt("login")
            .interact_text()
            .context("Failed to read login")?,
    };
    let password = match password {
        Some(p) => p.to_string(),
        // `Password` hides input in terminal.
        None => Password::new()
            .with_prompt("password")
            .interact()
            .context("Failed to read password")?,
    };
    Ok(Credentials { login, password })
}

/// Steady-ticking spinner on stderr; hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
