// lexscrub/src/commands/scrub.rs
//! Scrub command implementation: one full engine run from the terminal.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};

use lexscrub_core::{
    EngineOptions, FileAudit, LexiconFile, MatchMode, RemoteBrandExtractor, RemoteSynonymOracle,
    ScrubEngine, ScrubRequest,
};

use crate::cli::ScrubCommand;
use crate::ui::render_summary;

/// The main operation runner for the `scrub` subcommand.
pub fn run(cmd: &ScrubCommand) -> Result<()> {
    info!("Starting lexscrub operation.");

    let text = read_input(cmd)?;
    let store = LexiconFile::load_from_file(&cmd.lexicon)
        .context("Failed to load lexicon")?
        .into_store();

    let options = EngineOptions::default()
        .with_literal_mode(if cmd.word_boundary {
            MatchMode::WordBoundary
        } else {
            MatchMode::Substring
        })
        .with_brand_category(cmd.brand_category.clone())
        .with_keyword_category(cmd.keyword_category.clone());

    let mut engine = ScrubEngine::with_options(Arc::new(store), options);

    if let Some(url) = cmd.oracle_url.as_deref() {
        let key = cmd.oracle_key.clone().unwrap_or_default();
        let oracle = RemoteSynonymOracle::new(url, key.clone(), cmd.oracle_model.clone())
            .context("Failed to build remote synonym oracle")?;
        let extractor = RemoteBrandExtractor::new(url, key, cmd.oracle_model.clone())
            .context("Failed to build remote brand extractor")?;
        engine = engine
            .with_oracle(Arc::new(oracle))
            .with_extractor(Arc::new(extractor));
        debug!("remote oracle and extractor configured");
    }
    if let Some(path) = &cmd.audit_log {
        engine = engine.with_audit(Arc::new(FileAudit::new(path)));
    }

    let request = ScrubRequest {
        text,
        categories: cmd.categories.clone(),
        keywords: cmd.keywords.clone(),
        hotwords: cmd.hotwords.clone(),
        trim: cmd.trim,
    };

    let result = engine.scrub(&request).context("Scrub failed")?;
    debug!(
        "scrub complete: {} removals, {} appends",
        result.removed_tokens.len(),
        result.appended_keywords.len()
    );

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.cleaned_text);
    if !cmd.no_summary {
        eprint!("{}", render_summary(&result));
    }
    Ok(())
}

fn read_input(cmd: &ScrubCommand) -> Result<String> {
    if let Some(text) = &cmd.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cmd.input_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
