//! Domain error types.

use chrono::NaiveDate;

/// Structurally invalid input rejected at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("price series is empty")]
    EmptySeries,

    #[error("price series is not chronological at record {index}: {date} does not follow {previous}")]
    NotChronological {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("close price at record {index} ({date}) is not a finite number")]
    NonFiniteClose { index: usize, date: NaiveDate },

    #[error("window size must be a positive integer, got {value}")]
    InvalidWindow { value: i64 },

    #[error("invalid range {start}..={end} for series of {len} records")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// Top-level error type for equity.
#[derive(Debug, thiserror::Error)]
pub enum EquityError {
    #[error(transparent)]
    Input(#[from] InvalidInput),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to read {path}: {reason}")]
    DataRead { path: String, reason: String },

    #[error("data parse error at line {line}: {reason}")]
    DataParse { line: u64, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EquityError> for std::process::ExitCode {
    fn from(err: &EquityError) -> Self {
        let code: u8 = match err {
            EquityError::Io(_) => 1,
            EquityError::ConfigParse { .. }
            | EquityError::ConfigMissing { .. }
            | EquityError::ConfigInvalid { .. } => 2,
            EquityError::DataRead { .. } | EquityError::DataParse { .. } => 3,
            EquityError::Input(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
