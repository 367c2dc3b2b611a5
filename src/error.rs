//! Error types for queue ranking.
//!
//! Engine-level conditions (`MissingPrerequisiteData`, `MissingValueColumn`,
//! `AmountOverflow`) are terminal for the current run. `MalformedSchema` is
//! raised at the loader/schema boundary and kept distinct from these.

/// Result type for lead-queue operations.
pub type Result<T> = std::result::Result<T, LeadQueueError>;

/// Errors that can occur while loading, ranking, or emitting queues.
#[derive(Debug, thiserror::Error)]
pub enum LeadQueueError {
    /// A mandatory input table (roster, weekly transactions) is absent.
    #[error("Missing prerequisite data: the {table} table has not been loaded")]
    MissingPrerequisiteData { table: &'static str },

    /// A transaction table has no resolvable sale-amount column.
    #[error("Missing value column: no sale-amount column could be resolved in '{table}'")]
    MissingValueColumn { table: String },

    /// A consultant's summed sale amounts exceed the decimal range.
    #[error("Amount overflow: sales for '{consultant}' exceed the representable range")]
    AmountOverflow { consultant: String },

    /// Required sheets or columns were not found.
    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl LeadQueueError {
    /// Whether this error originates in the ranking engine itself
    /// rather than in a loader or emitter collaborator.
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPrerequisiteData { .. }
                | Self::MissingValueColumn { .. }
                | Self::AmountOverflow { .. }
        )
    }
}
