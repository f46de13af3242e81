// Library root
// -----------
// The binary (`main.rs`) parses arguments and hands them to `app::run`,
// which walks the upload workflow front to back.
//
// Module responsibilities:
// - `cli`: clap argument definitions.
// - `theme`: source directory checks and theme naming.
// - `session`: cookie file persistence for the site session.
// - `api`: HTTP interactions with the Plone site (probe, login, upload).
// - `authenticator`: CSRF token scraping from control panel HTML.
// - `archive`: in-memory ZIP packaging of the theme directory.
// - `ui`: terminal prompts and spinner.
// - `app`: the linear workflow tying the above together.
pub mod api;
pub mod app;
pub mod archive;
pub mod authenticator;
pub mod cli;
pub mod session;
pub mod theme;
pub mod ui;
