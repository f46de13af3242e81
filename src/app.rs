// The upload workflow: validate the source, probe the site, log in when the
// probe was bounced, archive, upload. Each step either hands its result to
// the next or ends the run with an error.

use crate::api::{PloneClient, Probe, UploadRequest};
use crate::archive;
use crate::cli::Cli;
use crate::theme::ThemeSource;
use crate::ui;
use anyhow::Result;

pub fn run(cli: &Cli) -> Result<()> {
    let theme = ThemeSource::open(&cli.source)?;
    let client = PloneClient::new(&cli.destination, cli.cookie_file.clone())?;

    let token = match client.probe()? {
        Probe::Authenticated { token } => token,
        Probe::LoginRequired { landed_on } => {
            log::info!("Not authenticated, redirected to {}", landed_on);
            let creds = ui::credentials(cli.username.as_deref(), cli.password.as_deref())?;
            client.login(&creds.login, &creds.password)?
        }
    };
    if token.is_empty() {
        log::warn!("No _authenticator token found on {}", client.control_panel_url());
    }

    let spinner = ui::spinner(&format!("Uploading {}...", theme.name()));
    let result = archive::build(&theme, &cli.cookie_file).and_then(|archive| {
        client.upload(UploadRequest {
            file_name: theme.archive_file_name(),
            archive,
            token: &token,
            enable: cli.enable,
        })
    });
    spinner.finish_and_clear();
    result
}
