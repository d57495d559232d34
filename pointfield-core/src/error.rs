/// Error types for the loading APIs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bitmap payload of {0} bytes holds no pixels")]
    Empty(u64),
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: cannot parse `{text}`")]
    Parse { line: usize, text: String },
    #[error("line {line}: operation before any `object` line")]
    NoObject { line: usize },
    #[error("object {object} is out of range (scene has {limit})")]
    ObjectOutOfRange { object: usize, limit: usize },
    #[error("object {object} needs {needed} slots but only {limit} exist")]
    SlotOverflow {
        object: usize,
        needed: usize,
        limit: usize,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
