// lexscrub/src/cli.rs
//! This file defines the command-line interface (CLI) for the lexscrub
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "lexscrub",
    author = "LexScrub Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub listing text against a curated lexicon",
    long_about = "Lexscrub is a command-line utility for cleaning free-form product or listing text against a curated lexicon of forbidden terms, brand names, and keywords. It removes matched phrases and their aliases (including fuzzy variants), optionally appends desired keywords, and fits the result inside a hard length budget.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'lexscrub' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `lexscrub` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrubs input text against the lexicon, redacting matched phrases.
    #[command(about = "Scrubs input text against the lexicon, redacting matched phrases.")]
    Scrub(ScrubCommand),

    /// Loads and validates a lexicon file, printing per-category statistics.
    #[command(about = "Loads and validates a lexicon file, printing per-category statistics.")]
    Lexicon(LexiconCommand),
}

/// Arguments for the `scrub` command.
#[derive(Parser, Debug)]
pub struct ScrubCommand {
    /// Text to scrub (reads from stdin if neither this nor --input-file is provided).
    #[arg(value_name = "TEXT", help = "Text to scrub; reads stdin when omitted.")]
    pub text: Option<String>,

    /// Path to the lexicon YAML file.
    #[arg(long = "lexicon", short = 'l', value_name = "FILE", help = "Path to the lexicon YAML file.")]
    pub lexicon: PathBuf,

    /// Path to an input file (overrides stdin).
    #[arg(long = "input-file", short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Lexicon categories to redact (comma-separated).
    #[arg(long, short = 'c', value_delimiter = ',', help = "Lexicon categories to redact (comma-separated).")]
    pub categories: Vec<String>,

    /// Desired keywords for the augmentation pool (repeatable).
    #[arg(long = "keyword", short = 'k', value_name = "WORD", help = "Desired keyword for the augmentation pool (repeatable).")]
    pub keywords: Vec<String>,

    /// Hotwords that must be present in the final text; suppresses keyword augmentation.
    #[arg(long, value_name = "WORDS", help = "Whitespace-separated words that must appear in the final text.")]
    pub hotwords: Option<String>,

    /// Enable importance-scored trimming down to the length ceiling.
    #[arg(long, help = "Enable importance-scored trimming down to the length ceiling.")]
    pub trim: bool,

    /// Use word-boundary matching for the literal lexicon pass.
    #[arg(long = "word-boundary", help = "Use word-boundary matching for the literal lexicon pass instead of raw substrings.")]
    pub word_boundary: bool,

    /// Category that brand-extractor hits are recorded under.
    #[arg(long = "brand-category", value_name = "NAME", default_value = "brand", help = "Category that brand-extractor hits are recorded under.")]
    pub brand_category: String,

    /// Lexicon category feeding the keyword-augmentation pool.
    #[arg(long = "keyword-category", value_name = "NAME", default_value = "keyword", help = "Lexicon category feeding the keyword-augmentation pool.")]
    pub keyword_category: String,

    /// Append usage-audit events to this file as JSON lines.
    #[arg(long = "audit-log", value_name = "FILE", help = "Append usage-audit events to this file as JSON lines.")]
    pub audit_log: Option<PathBuf>,

    /// Emit the full scrub result as JSON instead of the human summary.
    #[arg(long, help = "Emit the full scrub result as JSON.")]
    pub json: bool,

    /// Suppress the removal summary.
    #[arg(long = "no-summary", help = "Suppress the removal summary.")]
    pub no_summary: bool,

    /// Chat-completion endpoint for the remote synonym oracle and brand extractor.
    #[arg(long = "oracle-url", env = "LEXSCRUB_ORACLE_URL", value_name = "URL", help = "Chat-completion endpoint for the remote oracle and extractor.")]
    pub oracle_url: Option<String>,

    /// API key for the remote endpoint.
    #[arg(long = "oracle-key", env = "LEXSCRUB_ORACLE_KEY", value_name = "KEY", hide_env_values = true, help = "API key for the remote endpoint.")]
    pub oracle_key: Option<String>,

    /// Model name sent to the remote endpoint.
    #[arg(long = "oracle-model", env = "LEXSCRUB_ORACLE_MODEL", value_name = "MODEL", default_value = "gpt-4o-mini", help = "Model name sent to the remote endpoint.")]
    pub oracle_model: String,
}

/// Arguments for the `lexicon` command.
#[derive(Parser, Debug)]
pub struct LexiconCommand {
    /// Path to the lexicon YAML file.
    #[arg(value_name = "FILE", help = "Path to the lexicon YAML file.")]
    pub lexicon: PathBuf,
}
