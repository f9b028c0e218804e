use std::collections::HashSet;

use crate::analysis::starts_with_keyword;

pub const PACKAGE_KEYWORD: &str = "package";
pub const IMPORT_KEYWORD: &str = "import";

/// Outcome of merging statements into the import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub lines: Vec<String>,
    /// Statements that were not in the block before.
    pub added: usize,
}

/// Index of the first `package` line.
pub fn package_anchor(lines: &[String]) -> Option<usize> {
    lines
        .iter()
        .position(|line| starts_with_keyword(line, PACKAGE_KEYWORD))
}

/// Merge `statements` into the import block that follows the package line.
///
/// Without a package line the block is placed after line 0, whatever that
/// line holds. Blank lines directly after the anchor stay where they are when
/// an import block follows them. The merged block is deduplicated and sorted
/// by statement text; every other line is left untouched. When no statement
/// is new the input comes back unchanged.
pub fn insert_imports<S: AsRef<str>>(lines: &[String], statements: &[S]) -> Insertion {
    let unchanged = || Insertion {
        lines: lines.to_vec(),
        added: 0,
    };
    if lines.is_empty() {
        return unchanged();
    }

    let region = package_anchor(lines).map_or(1, |anchor| anchor + 1);
    let block_start = lines[region..]
        .iter()
        .position(|line| !line.trim().is_empty())
        .map(|offset| region + offset)
        .filter(|&idx| starts_with_keyword(&lines[idx], IMPORT_KEYWORD))
        .unwrap_or(region);
    let block_len = lines[block_start..]
        .iter()
        .take_while(|line| starts_with_keyword(line, IMPORT_KEYWORD))
        .count();
    let block_end = block_start + block_len;

    let existing: HashSet<&str> = lines[block_start..block_end]
        .iter()
        .map(|line| line.trim())
        .collect();
    let mut fresh: Vec<String> = Vec::new();
    for statement in statements {
        let statement = statement.as_ref().trim();
        if !existing.contains(statement) && !fresh.iter().any(|s| s == statement) {
            fresh.push(statement.to_string());
        }
    }
    if fresh.is_empty() {
        return unchanged();
    }
    let added = fresh.len();

    let mut block: Vec<String> = lines[block_start..block_end].to_vec();
    block.extend(fresh);
    block.sort_by(|a, b| a.trim().cmp(b.trim()));
    block.dedup_by(|a, b| a.trim() == b.trim());

    let mut out = Vec::with_capacity(lines.len() + added);
    out.extend_from_slice(&lines[..block_start]);
    out.extend(block);
    out.extend_from_slice(&lines[block_end..]);
    Insertion { lines: out, added }
}
