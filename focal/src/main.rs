use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod app;
mod config;
mod page;
mod utils;

use app::App;
use config::Config;

/// A study-session focus dashboard for your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Override the configuration directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load a session snapshot on startup
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::get(cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = match App::new(config, cli.snapshot.as_deref()) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = app.run() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
