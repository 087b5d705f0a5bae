use std::path::PathBuf;

/// Errors surfaced by loading, configuring and reporting a training run.
///
/// Numeric trouble during training (NaN from a constant column, overflow in an
/// activation) is not an error: it propagates through the weights as-is.
#[derive(thiserror::Error, Debug)]
pub enum BpnnError {
    #[error("unable to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("problem in line {field}: {message}")]
    Config { field: String, message: String },

    #[error("data line {line}: {message}")]
    Data { line: usize, message: String },

    #[error("no patterns found in {path}")]
    EmptyDataset { path: PathBuf },

    #[error("invalid JSON parameter file: {0}")]
    Json(#[from] serde_json::Error),
}

impl BpnnError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BpnnError::Io { path: path.into(), source }
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        BpnnError::Config { field: field.into(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, BpnnError>;
