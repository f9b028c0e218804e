use crate::analysis::{ChangeItem, disabled_import};

use super::insert::insert_imports;

/// Lines after applying a change list, with what was actually done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFix {
    pub lines: Vec<String>,
    /// The edits actually made; an uncomment that fell back to adding shows
    /// up as `AddImport`.
    pub changes: Vec<ChangeItem>,
    pub added: usize,
    pub uncommented: usize,
}

impl AppliedFix {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.uncommented > 0
    }
}

/// Uncomment first, then merge the remaining statements into the import
/// block. An uncomment request with no eligible line (for example an import
/// inside a multi-line `/* */` block) is added as a fresh import instead,
/// unless the statement is already an active line somewhere in the file.
pub fn apply_changes(mut lines: Vec<String>, changes: &[ChangeItem]) -> AppliedFix {
    let mut uncommented = 0usize;
    let mut applied: Vec<ChangeItem> = Vec::new();

    for change in changes {
        match change {
            ChangeItem::UncommentImport(statement) => {
                if uncomment_import(&mut lines, statement) {
                    uncommented += 1;
                    applied.push(change.clone());
                } else if lines.iter().any(|line| line.trim() == statement) {
                    tracing::trace!(
                        statement = statement.as_str(),
                        "already uncommented"
                    );
                } else {
                    tracing::debug!(
                        statement = statement.as_str(),
                        "no uncommentable line, adding import instead"
                    );
                    applied.push(ChangeItem::AddImport(statement.clone()));
                }
            }
            ChangeItem::AddImport(_) => applied.push(change.clone()),
        }
    }

    let to_add: Vec<&str> = applied
        .iter()
        .filter_map(|change| match change {
            ChangeItem::AddImport(statement) => Some(statement.as_str()),
            ChangeItem::UncommentImport(_) => None,
        })
        .collect();
    let insertion = insert_imports(&lines, &to_add);
    AppliedFix {
        lines: insertion.lines,
        changes: applied,
        added: insertion.added,
        uncommented,
    }
}

/// Re-enable the first `//import ...` or single-line `/*import ... */` line
/// holding exactly `statement`. Returns whether a line was changed.
pub fn uncomment_import(lines: &mut [String], statement: &str) -> bool {
    let Some(line) = lines.iter_mut().find(|line| {
        let trimmed = line.trim_start();
        (trimmed.starts_with("//") || trimmed.starts_with("/*"))
            && disabled_import(line).as_deref() == Some(statement)
    }) else {
        return false;
    };

    if line.trim_start().starts_with("//") {
        *line = line.replacen("//", "", 1);
    } else {
        let opened = line.replacen("/*", "", 1);
        let body = opened.trim_end();
        *line = body.strip_suffix("*/").unwrap_or(body).trim_end().to_string();
    }
    true
}
