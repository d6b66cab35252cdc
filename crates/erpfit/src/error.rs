//! Error types for erpfit.
//!
//! This module defines all error types used throughout the erpfit crate,
//! providing detailed context for debugging and user-friendly error messages.

use thiserror::Error;

use crate::catalog::Section;

/// The main error type for erpfit operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Assessment Errors ===
    /// An answer referenced a question id that is not in the catalog.
    #[error("unknown question: {id}")]
    UnknownQuestion {
        /// The offending question id.
        id: String,
    },

    /// A raw answer value could not be interpreted.
    #[error("invalid answer: {input:?}")]
    InvalidAnswer {
        /// The raw input as received.
        input: String,
    },

    /// A section index outside the catalog was requested.
    #[error("section index {index} is out of range")]
    SectionOutOfRange {
        /// The requested index.
        index: usize,
    },

    /// Scoring was refused because a section has no answers.
    #[error("cannot score: no answers recorded for the {section} section")]
    InsufficientAnswers {
        /// The section without answers.
        section: Section,
    },

    /// The session has already produced results.
    #[error("assessment is already complete; reset to start over")]
    AssessmentComplete,

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for erpfit operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown question error.
    #[must_use]
    pub fn unknown_question(id: impl Into<String>) -> Self {
        Self::UnknownQuestion { id: id.into() }
    }

    /// Create an invalid answer error.
    #[must_use]
    pub fn invalid_answer(input: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            input: input.into(),
        }
    }

    /// Check if this error means the session must be reset before continuing.
    #[must_use]
    pub fn is_assessment_complete(&self) -> bool {
        matches!(self, Self::AssessmentComplete)
    }

    /// Check if this error came from user input rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownQuestion { .. } | Self::InvalidAnswer { .. }
        )
    }
}
