use thiserror::Error;

use crate::models::ClimateVariable;

pub type Result<T> = std::result::Result<T, ProjectionError>;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Insufficient data for {variable}: {available} valid years, {required} required")]
    InsufficientData {
        variable: ClimateVariable,
        available: usize,
        required: usize,
    },

    #[error("Degenerate trend fit for {variable}: {reason}")]
    DegenerateFit {
        variable: ClimateVariable,
        reason: String,
    },

    #[error("Scenario {scenario} has no adjustment entry for {variable}")]
    UnsupportedVariable {
        variable: ClimateVariable,
        scenario: String,
    },

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid projection horizon: {0}")]
    InvalidHorizon(i32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ProjectionError {
    /// Recoverable failures mean the affected variable is omitted from the
    /// output rather than aborting the whole analysis.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ProjectionError::InsufficientData { .. }
                | ProjectionError::DegenerateFit { .. }
                | ProjectionError::UnsupportedVariable { .. }
        )
    }
}
