// HTTP client for the Plone site. One `PloneClient` is built per run and
// passed through the workflow; it owns the cookie jar shared by every
// request so the session established by login carries into the upload.

use crate::archive::ThemeArchive;
use crate::authenticator;
use crate::session;
use anyhow::{bail, Context, Result};
use reqwest::blocking::{multipart, Client};
use reqwest::cookie::Jar;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

const CONTROL_PANEL: &str = "@@theming-controlpanel";
const LOGIN_FORM: &str = "login_form";
/// Suffix of the redirect Plone answers a successful import with.
pub const MAPPER_SUFFIX: &str = "-controlpanel-mapper";

/// Result of probing the theming control panel.
#[derive(Debug, PartialEq, Eq)]
pub enum Probe {
    /// The panel rendered at the requested URL; carries its CSRF token.
    Authenticated { token: String },
    /// The site redirected elsewhere, usually the login form.
    LoginRequired { landed_on: Url },
}

/// Login form payload. Field names are Plone's.
#[derive(Serialize, Debug)]
pub struct LoginForm<'a> {
    pub came_from: &'a str,
    #[serde(rename = "__ac_name")]
    pub login: &'a str,
    #[serde(rename = "__ac_password")]
    pub password: &'a str,
    #[serde(rename = "form.submitted")]
    pub submitted: u8,
}

/// Options of a theme import request.
pub struct UploadRequest<'a> {
    pub file_name: String,
    pub archive: ThemeArchive,
    pub token: &'a str,
    pub enable: bool,
}

pub struct PloneClient {
    /// Follows every redirect; used for the probe and the login POST.
    client: Client,
    /// Never follows redirects so the import's `Location` stays visible.
    upload_client: Client,
    jar: Arc<Jar>,
    destination: Url,
    cookie_file: PathBuf,
}

impl PloneClient {
    /// Build the client for `destination` and install any session stored in
    /// `cookie_file`.
    pub fn new(destination: &str, cookie_file: PathBuf) -> Result<Self> {
        let destination = parse_destination(destination)?;
        let jar = Arc::new(Jar::default());
        session::load(&jar, &cookie_file, &destination);

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .context("Failed to build HTTP client")?;
        let upload_client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .redirect(Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(PloneClient { client, upload_client, jar, destination, cookie_file })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.destination.as_str().trim_end_matches('/'), path)
    }

    pub fn control_panel_url(&self) -> String {
        self.endpoint(CONTROL_PANEL)
    }

    /// GET the theming control panel. Anything but a 200 means the site is
    /// not a Plone site we can talk to.
    pub fn probe(&self) -> Result<Probe> {
        let url = Url::parse(&self.control_panel_url()).context("Invalid control panel URL")?;
        log::debug!("Probing {}", url);
        let res = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Theme destination Plone site not found ({})", url))?;

        let status = res.status();
        if status != StatusCode::OK {
            bail!("Theme destination Plone site not found (response: {})", status.as_u16());
        }

        if res.url() != &url {
            return Ok(Probe::LoginRequired { landed_on: res.url().clone() });
        }

        let body = res.text().context("Failed to read control panel response")?;
        log::info!("Reusing stored session for {}", self.destination);
        Ok(Probe::Authenticated { token: authenticator::extract(&body) })
    }

    /// POST the login form, following redirects back to the control panel.
    /// Persists the session cookie and returns the CSRF token found on the
    /// page the login landed on.
    pub fn login(&self, login: &str, password: &str) -> Result<String> {
        let came_from = self.control_panel_url();
        let form = LoginForm { came_from: &came_from, login, password, submitted: 1 };

        log::debug!("Logging in as {}", login);
        let res = self
            .client
            .post(self.endpoint(LOGIN_FORM))
            .form(&form)
            .send()
            .context("Failed to send login request")?;

        let status = res.status();
        if status != StatusCode::OK {
            bail!("Login failed (response: {})", status.as_u16());
        }
        let body = res.text().context("Failed to read login response")?;

        let cookies = match session::cookie_string(&self.jar, &self.destination) {
            Some(c) => c,
            None => bail!("Invalid username or password"),
        };
        session::save(&self.cookie_file, &cookies)?;
        log::info!("Logged in as {}", login);

        Ok(authenticator::extract(&body))
    }

    /// Multipart POST of the theme archive to the import action. Succeeds
    /// only when Plone redirects to the theme mapper.
    pub fn upload(&self, req: UploadRequest<'_>) -> Result<()> {
        let part = multipart::Part::bytes(req.archive.bytes)
            .file_name(req.file_name)
            .mime_str("application/zip")
            .context("Invalid archive content type")?;
        let mut form = multipart::Form::new()
            .part("themeArchive", part)
            .text("replaceExisting:boolean", "1")
            .text("form.button.Import", "1")
            .text("_authenticator", req.token.to_string());
        if req.enable {
            form = form.text("enableNewTheme:boolean", "1");
        }

        let res = self
            .upload_client
            .post(self.control_panel_url())
            .multipart(form)
            .send()
            .context("Failed to send upload request")?;

        let status = res.status();
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        log::debug!("Upload answered {} (location: {:?})", status, location);

        if is_import_success(location) {
            Ok(())
        } else {
            bail!("Unexpected error")
        }
    }
}

/// Parse and normalise the site URL: trailing slashes go, only http(s) is
/// accepted.
pub fn parse_destination(destination: &str) -> Result<Url> {
    let trimmed = destination.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .with_context(|| format!("Invalid theme destination URL {}", destination))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Unsupported theme destination scheme {} in {}", other, destination),
    }
}

pub fn is_import_success(location: &str) -> bool {
    location.ends_with(MAPPER_SUFFIX)
}
