mod dates;
mod error;
mod rentals;
mod report;
mod stats;

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::{rentals::load_rentals, report::Report};

#[derive(Parser, Debug)]
struct Args {
    /// Rentals CSV, defaults to data/alquileres.csv in the crate root
    dataset: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let dataset = Args::parse().dataset.unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("alquileres.csv")
    });
    let dataset = dataset.canonicalize().unwrap_or(dataset);
    println!("Dataset: {}", dataset.display());

    let rentals = match load_rentals(&dataset) {
        Ok(rentals) => rentals,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", Report::new(&rentals));
    ExitCode::SUCCESS
}
