//! Payables domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::PortError;

use crate::validation::BillValidationError;

/// Errors that can occur while entering and submitting a bill
#[derive(Debug, Error)]
pub enum PayablesError {
    /// The draft failed a pre-submission check
    #[error(transparent)]
    Validation(#[from] BillValidationError),

    /// The bill service rejected or failed the create call
    #[error("{message}")]
    Submission {
        message: String,
        #[source]
        source: PortError,
    },

    /// Reference data could not be loaded
    #[error("{0}")]
    Load(String),

    /// No expense line at the given position
    #[error("Expense line not found at position {0}")]
    LineNotFound(usize),

    /// Expense amounts may not be negative
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// The form is busy with another operation
    #[error("Form is busy: {0}")]
    Busy(&'static str),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PayablesError {
    /// Creates a Submission error, preferring the collaborator's own detail
    /// over the fallback message
    pub fn submission(source: PortError, fallback: &str) -> Self {
        let message = source
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        PayablesError::Submission { message, source }
    }

    /// The message to show inline on the form
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<config::ConfigError> for PayablesError {
    fn from(err: config::ConfigError) -> Self {
        PayablesError::Configuration(err.to_string())
    }
}
