use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static LINE_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").unwrap());
static BLOCK_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static IMPORT_STMT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"import\s+.*").unwrap());

/// Line prefixes (after trimming) that mark an import disabled by a comment.
const DISABLED_IMPORT_PREFIXES: [&str; 3] = ["//import", "/*import", "* import"];

/// Remove `//` suffixes and `/* */` spans. The result is only good for
/// symbol detection: string literals are not understood, so a `//` inside a
/// string cuts the rest of that line as well.
pub fn strip_comments(source: &str) -> String {
    let without_line = LINE_COMMENT_RE.replace_all(source, "");
    BLOCK_COMMENT_RE.replace_all(&without_line, "").into_owned()
}

/// If `line` is an import hidden behind a comment marker, return the
/// statement text starting at the `import` keyword.
pub fn disabled_import(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !DISABLED_IMPORT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return None;
    }
    let stmt = IMPORT_STMT_RE.find(trimmed)?.as_str().trim_end();
    let stmt = stmt.strip_suffix("*/").map(str::trim_end).unwrap_or(stmt);
    Some(stmt.to_string())
}

/// Collect every commented-out import statement from the raw source.
pub fn commented_imports(source: &str) -> BTreeSet<String> {
    source.lines().filter_map(disabled_import).collect()
}
