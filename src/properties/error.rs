use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropertiesError {
    #[error("failed to scan directory '{path}': {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read property file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed escape sequence in '{path}' at line {line}")]
    Parse { path: PathBuf, line: usize },
}
