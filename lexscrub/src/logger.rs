// lexscrub/src/logger.rs
//! Logger bootstrap for the CLI.

use env_logger::Builder;
use log::LevelFilter;

/// Initializes the global logger. An explicit level overrides `RUST_LOG`;
/// without one, the environment decides and warnings are the floor.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    // Ignore double-initialization so tests can call this repeatedly.
    let _ = builder.format_timestamp_secs().try_init();
}
