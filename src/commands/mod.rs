pub mod check;

pub use check::{CheckOptions, FileOutcome, FileReport, check_file};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::report::{OutputFormat, Summary, render_json, render_text};
use crate::utils::collect_sources;

/// Check (or fix) every source reachable from `paths` and print the results.
pub fn run(
    paths: &[PathBuf],
    config: Option<&Path>,
    registry: Option<&Path>,
    auto: bool,
    format: OutputFormat,
) -> Result<Vec<FileReport>> {
    let cfg = AppConfig::load(config).context("failed to load config")?;
    let registry = cfg
        .build_registry(registry)
        .context("failed to load symbol registry")?;
    let exclude = cfg.exclude_patterns()?;
    let files = collect_sources(paths, &cfg.extensions, &exclude);
    tracing::info!(
        files = files.len(),
        symbols = registry.len(),
        auto,
        "check start"
    );

    let opts = CheckOptions {
        registry: &registry,
        trigger: &cfg.trigger,
        auto,
    };
    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let report = check_file(file, &opts);
        if format == OutputFormat::Text {
            println!("{}", render_text(&report, &cfg.trigger));
        }
        reports.push(report);
    }

    match format {
        OutputFormat::Json => println!("{}", render_json(&reports)?),
        OutputFormat::Text => {
            if reports.is_empty() {
                println!("no source files found");
            }
        }
    }

    let summary = Summary::from_reports(&reports);
    tracing::info!(
        files = summary.files,
        clean = summary.clean,
        dirty = summary.dirty,
        fixed = summary.fixed,
        skipped = summary.skipped,
        errors = summary.errors,
        "check done"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn run_invalid_config() {
        let result = run(
            &[PathBuf::from("A.kt")],
            Some(Path::new("nonexistent_config.toml")),
            None,
            false,
            OutputFormat::Text,
        );
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to load config")
        );
    }

    #[test]
    fn run_invalid_registry() {
        let temp_dir = TempDir::new().unwrap();
        let registry = temp_dir.path().join("bad.toml");
        fs::write(&registry, "[symbols]\nText = \"not an import\"\n").unwrap();
        let config = temp_dir.path().join("checkimport.toml");
        fs::write(&config, "[checkimport]\n").unwrap();

        let result = run(
            &[temp_dir.path().to_path_buf()],
            Some(&config),
            Some(&registry),
            false,
            OutputFormat::Text,
        );
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to load symbol registry")
        );
    }

    #[test]
    fn run_over_directory_fixes_each_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(
            src.join("A.kt"),
            "package p\n\n@Composable\nfun A() { Text(\"a\") }\n",
        )
        .unwrap();
        fs::write(src.join("Util.kt"), "package p\n\nfun util() = 1\n").unwrap();
        let config = temp_dir.path().join("checkimport.toml");
        fs::write(&config, "[checkimport]\n").unwrap();

        let reports = run(
            &[src.clone(), src.join("Missing.kt")],
            Some(&config),
            None,
            true,
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(reports.len(), 3);
        assert!(matches!(reports[0].outcome, FileOutcome::Fixed { .. }));
        assert_eq!(reports[1].outcome, FileOutcome::Skip);
        assert!(matches!(reports[2].outcome, FileOutcome::Error { .. }));

        let fixed = fs::read_to_string(src.join("A.kt")).unwrap();
        assert!(fixed.contains("import androidx.compose.material3.Text\n"));
        assert!(fixed.contains("import androidx.compose.runtime.Composable\n"));
    }
}
