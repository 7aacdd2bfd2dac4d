// lexscrub/src/commands/lexicon.rs
//! Lexicon command implementation: load, validate, and summarize a lexicon
//! file without running a scrub.

use anyhow::{Context, Result};

use lexscrub_core::LexiconFile;

use crate::cli::LexiconCommand;
use crate::ui::render_lexicon_stats;

pub fn run(cmd: &LexiconCommand) -> Result<()> {
    let store = LexiconFile::load_from_file(&cmd.lexicon)
        .context("Failed to load lexicon")?
        .into_store();
    print!("{}", render_lexicon_stats(&store));
    Ok(())
}
