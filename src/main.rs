mod cli;
mod config;
mod credential;
mod model;
mod source;
mod storage;
mod tracker;
mod triage;
mod workspace;

use std::{io, process};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::Config;
use storage::Storage;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        process::exit(1);
    });

    let root = Storage::default_root().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
