// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, run the workflow.
// - Every terminal branch exits explicitly with 0 or 1.

use clap::Parser;
use plonetheme_upload::{app, cli::Cli};

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match app::run(&cli) {
        Ok(()) => {
            println!("Upload successful");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
