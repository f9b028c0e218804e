//! Read-only analysis of a Kotlin source: comment stripping, disabled-import
//! scanning and missing-import detection.

pub mod comments;
pub mod detect;

pub use comments::{commented_imports, disabled_import, strip_comments};
pub use detect::{ChangeItem, Detection, detect, find_missing_imports};

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `word` occurs in `text` with no identifier character directly
/// before or after it, so `Text` does not match inside `MyText` or `TextField`.
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, m)| {
        let before = text[..start].chars().next_back();
        let after = text[start + m.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

/// True when the trimmed line is `keyword` or starts with `keyword` followed
/// by whitespace.
pub(crate) fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    match line.trim_start().strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}
