//! CLI module
//!
//! Command-line interface for retrieving lists.
//!
//! # Commands
//!
//! - `fetch` - Retrieve a list and print its records
//! - `url` - Print the first-page URL of a list without fetching
//! - `cache` - Show entries of a cache file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
