//! Engine error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Errors that abort a batch run.
///
/// Business-as-usual outcomes (shortfalls, low scores, conflicts repaired
/// by the resolver) are reported in the batch result, never as errors.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid batch input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RosterError {
    /// Validation errors, if this is an input error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            RosterError::InvalidInput(errors) => errors,
            RosterError::Config(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        RosterError::InvalidInput(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type RosterResult<T> = Result<T, RosterError>;
