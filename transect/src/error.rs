use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransectError {
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("station '{0}' has not been processed")]
    NotProcessed(String),

    #[error("station '{station}', point '{point}': {field} is not numeric")]
    NonNumeric {
        station: String,
        point: String,
        field: &'static str,
    },

    #[error("duplicate station id '{0}'")]
    DuplicateStation(String),

    #[error("correction: {0}")]
    Correction(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),
}

impl TransectError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
