// lexscrub/src/lib.rs
//! # LexScrub CLI Application
//!
//! This crate provides the command-line interface for the LexScrub engine:
//! loading a lexicon file, wiring the optional remote collaborators from the
//! environment, running one scrub, and rendering the result.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
