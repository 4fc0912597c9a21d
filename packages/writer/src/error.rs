use crate::language::Language;
use jsonmodeler_model::ModelError;
use thiserror::Error;

/// Broad category of a [`WriterError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid, unknown or conflicting options; reported before rendering
    Configuration,
    /// A model shape the target language cannot represent
    Unsupported,
    /// Broken invariants or an aborted render
    Internal,
}

/// Errors that can occur while rendering a class graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriterError {
    #[error("Unknown {language} option '{key}'")]
    UnknownOption { language: Language, key: String },

    #[error("Invalid value '{value}' for {language} option '{key}': {reason}")]
    InvalidOption {
        language: Language,
        key: String,
        value: String,
        reason: String,
    },

    #[error("Conflicting {language} options '{first}' and '{second}': {reason}")]
    ConflictingOptions {
        language: Language,
        first: String,
        second: String,
        reason: String,
    },

    #[error("{writer} writer cannot use options for {given}")]
    OptionsMismatch { writer: Language, given: Language },

    #[error("Unknown output language '{0}'")]
    UnknownLanguage(String),

    #[error("{language} has no mapping for type {ty} of property '{property}' in class '{class}'")]
    UnsupportedType {
        language: Language,
        class: String,
        property: String,
        ty: String,
    },

    #[error("Invalid class model: {0}")]
    Model(#[from] ModelError),

    #[error("Render budget exceeded after {rendered} of {total} classes: {reason}")]
    BudgetExceeded {
        rendered: usize,
        total: usize,
        reason: String,
    },

    #[error("Internal writer error: {0}")]
    Invariant(String),
}

impl WriterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WriterError::UnknownOption { .. }
            | WriterError::InvalidOption { .. }
            | WriterError::ConflictingOptions { .. }
            | WriterError::OptionsMismatch { .. }
            | WriterError::UnknownLanguage(_) => ErrorKind::Configuration,
            WriterError::UnsupportedType { .. } => ErrorKind::Unsupported,
            WriterError::Model(_)
            | WriterError::BudgetExceeded { .. }
            | WriterError::Invariant(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_option(
        language: Language,
        key: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WriterError::InvalidOption {
            language,
            key: key.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn conflict(
        language: Language,
        first: &str,
        second: &str,
        reason: impl Into<String>,
    ) -> Self {
        WriterError::ConflictingOptions {
            language,
            first: first.to_string(),
            second: second.to_string(),
            reason: reason.into(),
        }
    }
}

pub type WriterResult<T> = Result<T, WriterError>;
