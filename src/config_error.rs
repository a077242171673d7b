use std::{io, path::PathBuf};

use crate::log::log_level::ParseLevelError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error reading file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected `key = value` or `[Section]`, got {content:?}")]
    Syntax { line: usize, content: String },
    #[error("invalid level for `{key}`: {source}")]
    Level {
        key: String,
        #[source]
        source: ParseLevelError,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
