mod buckets_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod lookup_cmd;
mod verify_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Verify(args) => verify_cmd::run(args),
        Command::Lookup(args) => lookup_cmd::run(args),
        Command::Buckets(args) => buckets_cmd::run(args),
    }
}
