//! Command line definition. Only the argument structure lives here so the
//! workflow can be driven from tests without going through `parse`.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Name of the session cookie file, relative to the working directory.
pub const DEFAULT_COOKIE_FILE: &str = ".plonetheme-upload-cookie";

#[derive(Parser, Debug, Clone)]
#[command(name = "plonetheme-upload", about = "Plone Theme Uploader", version)]
pub struct Cli {
    /// Theme source directory
    pub source: PathBuf,

    /// Theme destination Plone site url
    pub destination: String,

    /// Enable theme after upload
    #[arg(long)]
    pub enable: bool,

    /// Login name used when the site asks for authentication
    #[arg(long, env = "PLONE_USERNAME")]
    pub username: Option<String>,

    /// Password used when the site asks for authentication
    #[arg(long, env = "PLONE_PASSWORD", hide = true, hide_env_values = true)]
    pub password: Option<String>,

    /// File holding the persisted session cookie
    #[arg(long, env = "PLONETHEME_UPLOAD_COOKIE", default_value = DEFAULT_COOKIE_FILE)]
    pub cookie_file: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
