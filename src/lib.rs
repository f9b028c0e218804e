//! Detect and fix missing Jetpack Compose imports in Kotlin sources.
//!
//! A source is stripped of comments, every registry symbol used in it is
//! classified as imported, commented out or missing, and in `--auto` mode the
//! import block after the `package` line is rewritten in place.

// Module declarations
pub mod analysis;
pub(crate) mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fix;
pub mod registry;
pub mod report;
pub mod utils;

pub use analysis::{ChangeItem, Detection, detect};
pub use commands::{CheckOptions, FileOutcome, FileReport, check_file};
pub use error::FixError;
pub use fix::{apply_changes, insert_imports};
pub use registry::{SymbolEntry, SymbolRegistry};

use anyhow::Result;

/// Main entry point for CLI usage
pub fn run_cli() -> Result<()> {
    cli::run_cli()
}

/// Entry point for CLI usage with custom arguments
pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cli::run_cli_with(args)
}
