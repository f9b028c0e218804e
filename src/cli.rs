use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands;
use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "checkimport",
    version,
    about = "Detect and fix missing Jetpack Compose imports"
)]
struct Cli {
    /// Increase verbosity (-v, -vv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Kotlin source files or directories to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Apply fixes in place instead of only reporting them
    #[arg(long)]
    auto: bool,

    /// Path to checkimport.toml (defaults to ./checkimport.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Registry file with a [symbols] table, replacing the built-in one
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    // stdout carries the report; logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn run_cli() -> Result<()> {
    dispatch(Cli::parse())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    dispatch(Cli::try_parse_from(args)?)
}

fn dispatch(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);
    commands::run(
        &cli.paths,
        cli.config.as_deref(),
        cli.registry.as_deref(),
        cli.auto,
        cli.format,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "checkimport",
            "-vv",
            "--auto",
            "--format",
            "json",
            "a.kt",
            "src",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.auto);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.paths, vec![PathBuf::from("a.kt"), PathBuf::from("src")]);
    }

    #[test]
    fn requires_a_path() {
        assert!(Cli::try_parse_from(["checkimport", "--auto"]).is_err());
        assert!(run_cli_with(["checkimport"]).is_err());
    }

    #[test]
    fn run_cli_with_fixes_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("A.kt");
        fs::write(&file, "package p\n\n@Composable\nfun A() { Text(\"a\") }\n").unwrap();
        let config = dir.path().join("checkimport.toml");
        fs::write(&config, "[checkimport]\n").unwrap();

        run_cli_with([
            "checkimport".to_string(),
            "--auto".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            file.display().to_string(),
        ])
        .unwrap();
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "package p\nimport androidx.compose.material3.Text\nimport androidx.compose.runtime.Composable\n\n@Composable\nfun A() { Text(\"a\") }\n"
        );
    }
}
