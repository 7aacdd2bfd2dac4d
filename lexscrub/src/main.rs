// lexscrub/src/main.rs
//! LexScrub entry point.
//!
//! Parses the CLI, bootstraps logging, and dispatches to the selected
//! command.

use anyhow::Result;
use clap::Parser;

use lexscrub::cli::{Cli, Commands};
use lexscrub::commands;
use lexscrub::logger;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match &args.command {
        Commands::Scrub(cmd) => commands::scrub::run(cmd),
        Commands::Lexicon(cmd) => commands::lexicon::run(cmd),
    }
}
