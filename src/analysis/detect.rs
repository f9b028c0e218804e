use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use super::comments::{commented_imports, disabled_import, strip_comments};
use super::contains_word;
use crate::registry::SymbolRegistry;

/// Annotation that marks a file as declaring UI components.
pub const DEFAULT_TRIGGER: &str = "@Composable";
/// Property delegation keyword, surrounded by spaces.
pub const DELEGATE_OPERATOR: &str = " by ";
pub const GET_VALUE_IMPORT: &str = "import androidx.compose.runtime.getValue";
pub const SET_VALUE_IMPORT: &str = "import androidx.compose.runtime.setValue";

/// One edit the fixer should make for a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "statement", rename_all = "snake_case")]
pub enum ChangeItem {
    AddImport(String),
    UncommentImport(String),
}

impl ChangeItem {
    pub fn statement(&self) -> &str {
        match self {
            ChangeItem::AddImport(s) | ChangeItem::UncommentImport(s) => s,
        }
    }
}

/// Result of analysing one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Trigger marker absent; nothing was analysed.
    Skip,
    Clean,
    Missing(Vec<ChangeItem>),
}

/// Analyse `source`: gate on `trigger`, then classify every registry symbol
/// in use.
pub fn detect(source: &str, registry: &SymbolRegistry, trigger: &str) -> Detection {
    if !source.contains(trigger) {
        tracing::debug!(trigger, "trigger marker not found, skipping analysis");
        return Detection::Skip;
    }
    let stripped = strip_comments(source);
    let commented = commented_imports(source);
    let changes = find_missing_imports(source, &stripped, registry, &commented);
    if changes.is_empty() {
        Detection::Clean
    } else {
        Detection::Missing(changes)
    }
}

/// Cross-reference symbol occurrences in `stripped` against the imports in
/// `raw` and the `commented` statements.
///
/// A statement counts as present only when it appears in an active line with
/// identifier boundaries on both sides, not as a plain substring. So
/// `import a.TextField` does not satisfy `import a.Text`, while an aliased
/// `import a.Text as T` still does.
pub fn find_missing_imports(
    raw: &str,
    stripped: &str,
    registry: &SymbolRegistry,
    commented: &BTreeSet<String>,
) -> Vec<ChangeItem> {
    let mut changes = ChangeList::new(raw, commented);

    for entry in registry.iter() {
        if entry.occurs_in(stripped) {
            tracing::trace!(symbol = %entry.symbol, "symbol in use");
            changes.classify(&entry.statement);
        }
    }

    // `by` delegation needs the runtime accessors whether or not they are
    // named anywhere.
    if stripped.contains(DELEGATE_OPERATOR) {
        tracing::trace!("delegated property found");
        changes.classify(GET_VALUE_IMPORT);
        changes.classify(SET_VALUE_IMPORT);
    }

    changes.items
}

struct ChangeList<'a> {
    active: String,
    commented: &'a BTreeSet<String>,
    seen: HashSet<String>,
    items: Vec<ChangeItem>,
}

impl<'a> ChangeList<'a> {
    fn new(raw: &str, commented: &'a BTreeSet<String>) -> Self {
        // Disabled imports contain the statement text too; they must not
        // count as present.
        let active = raw
            .lines()
            .filter(|line| disabled_import(line).is_none())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            active,
            commented,
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn classify(&mut self, statement: &str) {
        if !self.seen.insert(statement.to_string()) {
            return;
        }
        if contains_word(&self.active, statement) {
            tracing::trace!(statement, "already imported");
        } else if self.commented.contains(statement) {
            tracing::debug!(statement, "import is commented out");
            self.items
                .push(ChangeItem::UncommentImport(statement.to_string()));
        } else {
            tracing::debug!(statement, "import is missing");
            self.items.push(ChangeItem::AddImport(statement.to_string()));
        }
    }
}
