// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use review_scrape::{cli, log};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = log::init();

    let args = cli::Cli::parse();
    let what = format!("{:?}", args.command);
    cli::run(args).wrap_err_with(|| format!("review_scrape: {what} failed"))
}
