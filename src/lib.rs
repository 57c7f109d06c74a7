//! Locfix - maintenance tool for a generated modifier table
//!
//! Locfix keeps a generated Rust source file of localisation entries in
//! shape. It corrects wrongly localised strings from a CSV table, inserts
//! lines at their sorted position, and drives an external test command to
//! discover and insert entries that are still missing.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, reporting)
//! - `config`: Configuration file loading and parsing
//! - `corrections`: Correction table loaded from CSV
//! - `correct`: Localisation corrector
//! - `insert`: Sorted line inserter
//! - `command`: External test command runner
//! - `extract`: Unknown-modifier extraction from test output
//! - `resolve`: Test, extract and insert loop
//! - `atomic`: Whole-file rewrites through a temporary file
//! - `error`: Library error type
//! - `utils`: Shared line utilities

pub mod atomic;
pub mod cli;
pub mod command;
pub mod config;
pub mod correct;
pub mod corrections;
pub mod error;
pub mod extract;
pub mod insert;
pub mod resolve;
pub mod utils;

pub use error::{Error, Result};
