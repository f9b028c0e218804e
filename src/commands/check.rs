use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{ChangeItem, Detection, detect};
use crate::error::FixError;
use crate::fix::{apply_changes, join_lines, split_lines};
use crate::registry::SymbolRegistry;
use crate::utils::write_atomic;

/// Settings shared by every file of a run.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions<'a> {
    pub registry: &'a SymbolRegistry,
    pub trigger: &'a str,
    /// Write fixes back instead of only reporting them.
    pub auto: bool,
}

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Skip,
    Clean,
    /// Problems found in report mode; changes and counts are what `--auto`
    /// would do.
    Dirty {
        changes: Vec<ChangeItem>,
        added: usize,
        uncommented: usize,
    },
    Fixed {
        changes: Vec<ChangeItem>,
        added: usize,
        uncommented: usize,
    },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Line count of the file as it stands after this run.
    pub lines: usize,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Run the whole pipeline on one file. Never fails: I/O problems end up in
/// [`FileOutcome::Error`].
pub fn check_file(path: &Path, opts: &CheckOptions<'_>) -> FileReport {
    match run_file(path, opts) {
        Ok((outcome, lines)) => FileReport {
            path: path.to_path_buf(),
            lines,
            outcome,
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), "{}", err);
            FileReport {
                path: path.to_path_buf(),
                lines: 0,
                outcome: FileOutcome::Error {
                    message: err.to_string(),
                },
            }
        }
    }
}

fn run_file(path: &Path, opts: &CheckOptions<'_>) -> Result<(FileOutcome, usize), FixError> {
    if !path.exists() {
        return Err(FixError::NotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let line_count = source.lines().count();

    let changes = match detect(&source, opts.registry, opts.trigger) {
        Detection::Skip => return Ok((FileOutcome::Skip, line_count)),
        Detection::Clean => return Ok((FileOutcome::Clean, line_count)),
        Detection::Missing(changes) => changes,
    };
    tracing::debug!(
        path = %path.display(),
        changes = changes.len(),
        "missing imports detected"
    );

    let fix = apply_changes(split_lines(&source), &changes);
    if !opts.auto {
        return Ok((
            FileOutcome::Dirty {
                changes: fix.changes,
                added: fix.added,
                uncommented: fix.uncommented,
            },
            line_count,
        ));
    }

    let contents = join_lines(&fix.lines, source.ends_with('\n'));
    write_atomic(path, &contents).map_err(|source| FixError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        added = fix.added,
        uncommented = fix.uncommented,
        "auto-fix applied"
    );
    Ok((
        FileOutcome::Fixed {
            changes: fix.changes,
            added: fix.added,
            uncommented: fix.uncommented,
        },
        fix.lines.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEXT_IMPORT: &str = "import androidx.compose.material3.Text";

    fn text_only() -> SymbolRegistry {
        SymbolRegistry::from_pairs([("Text", TEXT_IMPORT)]).unwrap()
    }

    fn opts(registry: &SymbolRegistry, auto: bool) -> CheckOptions<'_> {
        CheckOptions {
            registry,
            trigger: "@Composable",
            auto,
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_is_reported() {
        let registry = text_only();
        let report = check_file(Path::new("no/such/Screen.kt"), &opts(&registry, true));
        match report.outcome {
            FileOutcome::Error { message } => assert!(message.contains("file not found")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let registry = text_only();
        let report = check_file(dir.path(), &opts(&registry, false));
        match report.outcome {
            FileOutcome::Error { message } => assert!(message.contains("error reading")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn skip_without_trigger_even_with_symbols() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Util.kt", "fun a() = Text(\"x\")\n");
        let registry = text_only();
        let report = check_file(&path, &opts(&registry, true));
        assert_eq!(report.outcome, FileOutcome::Skip);
        assert_eq!(report.lines, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fun a() = Text(\"x\")\n");
    }

    #[test]
    fn report_mode_never_writes() {
        let dir = TempDir::new().unwrap();
        let src = "package p\n\n@Composable\nfun A() { Text(\"x\") }\n";
        let path = write(&dir, "A.kt", src);
        let registry = text_only();
        let report = check_file(&path, &opts(&registry, false));
        assert_eq!(
            report.outcome,
            FileOutcome::Dirty {
                changes: vec![ChangeItem::AddImport(TEXT_IMPORT.into())],
                added: 1,
                uncommented: 0,
            }
        );
        assert_eq!(report.lines, 4);
        assert_eq!(fs::read_to_string(&path).unwrap(), src);
    }

    #[test]
    fn block_commented_import_is_listed_as_added() {
        let dir = TempDir::new().unwrap();
        let src = "package p\n/*\n * import androidx.compose.material3.Text\n */\n@Composable\nfun A() { Text(\"x\") }\n";
        let path = write(&dir, "A.kt", src);
        let registry = text_only();
        let report = check_file(&path, &opts(&registry, false));
        assert_eq!(
            report.outcome,
            FileOutcome::Dirty {
                changes: vec![ChangeItem::AddImport(TEXT_IMPORT.into())],
                added: 1,
                uncommented: 0,
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), src);
    }

    #[test]
    fn auto_mode_writes_and_second_run_is_clean() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "A.kt",
            "package p\n//import androidx.compose.material3.Text\n\n@Composable\nfun A() { Text(\"x\") }\n",
        );
        let registry = text_only();
        let report = check_file(&path, &opts(&registry, true));
        assert!(matches!(
            report.outcome,
            FileOutcome::Fixed {
                added: 0,
                uncommented: 1,
                ..
            }
        ));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "package p\nimport androidx.compose.material3.Text\n\n@Composable\nfun A() { Text(\"x\") }\n"
        );

        let again = check_file(&path, &opts(&registry, true));
        assert_eq!(again.outcome, FileOutcome::Clean);
    }

    #[test]
    fn header_without_package_gets_import_after_first_line() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "B.kt",
            "// header\n@Composable\nfun B() { Text(\"b\") }",
        );
        let registry = text_only();
        let report = check_file(&path, &opts(&registry, true));
        assert_eq!(report.lines, 4);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// header\nimport androidx.compose.material3.Text\n@Composable\nfun B() { Text(\"b\") }"
        );
    }

    #[test]
    fn report_serializes_flat() {
        let report = FileReport {
            path: PathBuf::from("A.kt"),
            lines: 3,
            outcome: FileOutcome::Fixed {
                changes: vec![ChangeItem::AddImport("import a.B".into())],
                added: 1,
                uncommented: 0,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "fixed");
        assert_eq!(json["path"], "A.kt");
        assert_eq!(json["added"], 1);
        assert_eq!(json["changes"][0]["action"], "add_import");
    }
}
