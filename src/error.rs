//! Errors raised while ingesting relationship records.

use thiserror::Error;

/// A record couldn't be turned into an edge.
///
/// `record` is the zero-based position of the offending record in the input sequence.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("record {record}: missing required field `{field}`")]
    MissingField { record: usize, field: &'static str },

    #[error("record {record}: relationship strength {value:?} is not a number")]
    NonNumericStrength { record: usize, value: String },

    #[error("record {record}: relationship strength must be finite and positive, got {value}")]
    InvalidStrength { record: usize, value: f64 },
}

impl ValidationError {
    /// Returns the position of the record that failed validation.
    pub fn record(&self) -> usize {
        match self {
            Self::MissingField { record, .. }
            | Self::NonNumericStrength { record, .. }
            | Self::InvalidStrength { record, .. } => *record,
        }
    }
}
