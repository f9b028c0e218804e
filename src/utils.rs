use glob::Pattern;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Expand inputs into source files. Explicit file paths (including missing
/// ones, which are reported later) pass through; directories are walked for
/// files with one of `extensions` that match no `exclude` pattern.
pub fn collect_sources(inputs: &[PathBuf], extensions: &[String], exclude: &[Pattern]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        let walker = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok);
        for entry in walker {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let ext_ok = path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| extensions.iter().any(|e| e == ext));
            if !ext_ok {
                continue;
            }
            if exclude.iter().any(|p| p.matches_path(path)) {
                tracing::trace!(path = %path.display(), "excluded");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }
    files
}

/// Replace `path` with `contents` in one step: write a sibling temp file,
/// copy the original permissions, then rename over the target. Symlinks are
/// resolved first so the link stays and its target gets the new contents.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let resolved = fs::canonicalize(path).ok();
    let path = resolved.as_deref().unwrap_or(path);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
