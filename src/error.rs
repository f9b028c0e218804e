use std::io;
use std::path::PathBuf;

/// Per-file failures. They are reported and never abort a run.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
