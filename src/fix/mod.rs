//! Pure line-sequence rewrites. Nothing here touches the file system.

pub mod apply;
pub mod insert;

pub use apply::{AppliedFix, apply_changes, uncomment_import};
pub use insert::{Insertion, insert_imports, package_anchor};

/// Split source text into lines, dropping `\n` / `\r\n` terminators.
pub fn split_lines(source: &str) -> Vec<String> {
    source.lines().map(str::to_string).collect()
}

/// Join lines with `\n`, keeping a final newline only if the source had one.
pub fn join_lines(lines: &[String], trailing_newline: bool) -> String {
    let mut out = lines.join("\n");
    if trailing_newline && !lines.is_empty() {
        out.push('\n');
    }
    out
}
