//! Error types for mostrar.

/// Result type alias for mostrar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while normalizing or formatting tables.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Arrow error during table processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Frame constructed without any record batches.
    #[error("Frame has no record batches")]
    EmptyFrame,

    /// Schema mismatch between frame batches.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },

    /// Grid rows with unequal lengths.
    #[error("Ragged grid: row {row} has {got} values, expected {expected}")]
    RaggedGrid {
        /// Index of the offending row.
        row: usize,
        /// Number of values in the offending row.
        got: usize,
        /// Number of values in row 0.
        expected: usize,
    },

    /// Categorical code with no matching category.
    #[error("Categorical code {code} out of range for {categories} categories")]
    CategoryOutOfRange {
        /// The offending dictionary code.
        code: i32,
        /// Number of categories available.
        categories: usize,
    },

    /// Interactive display surface rejected the table.
    #[error("Display sink error: {message}")]
    Sink {
        /// Description of the sink failure.
        message: String,
    },
}

impl Error {
    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create a display sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }
}
