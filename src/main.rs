mod cli;
mod code_cmd;
mod config;
mod generate;
mod logging;
mod sample_cmd;

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
        Command::Generate(args) => generate::run(args),
        Command::Sample(args) => sample_cmd::run(args),
        Command::Code(args) => code_cmd::run(args),
    }
}
