//! Errors from CSV persistence.

/// Errors raised while reading or writing CSV substrates.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path}: I/O error: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("corrupted substrate: {0}")]
    Corrupt(String),

    #[error("{path}: missing column `{column}`")]
    MissingColumn { path: String, column: String },

    #[error("{path}: row {row}: {message}")]
    InvalidRow {
        path: String,
        row: usize,
        message: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}
