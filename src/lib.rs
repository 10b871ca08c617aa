pub mod arff;
pub mod clean;
pub mod cli;
pub mod io_utils;
pub mod report;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{clean::CleanOptions, cli::Cli, report::RunReport};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("dataset_cleaner", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    execute(&cli)
}

pub fn execute(cli: &Cli) -> Result<()> {
    let options = CleanOptions {
        input_encoding: io_utils::resolve_encoding(cli.input_encoding.as_deref())?,
        output_encoding: io_utils::resolve_encoding(cli.output_encoding.as_deref())?,
    };
    debug!(
        "Encodings: input {}, output {}",
        options.input_encoding.name(),
        options.output_encoding.name()
    );

    let outcomes = clean::clean_path(&cli.path, &options)
        .with_context(|| format!("Cleaning {:?}", cli.path))?;
    info!("Cleaned {} file(s)", outcomes.len());

    if let Some(path) = &cli.report {
        RunReport::new(outcomes)
            .save(path)
            .with_context(|| format!("Writing report to {path:?}"))?;
        info!("Report written to {:?}", path);
    }
    Ok(())
}
