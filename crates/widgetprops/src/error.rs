use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropsError {
    #[error("Invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Property is already defined: {0}")]
    DuplicateProperty(String),

    #[error("Property is read-only: {0}")]
    NotEditable(String),

    #[error("Value '{value}' is outside the range of {path} ({bound})")]
    OutOfRange {
        path: String,
        value: String,
        bound: String,
    },

    #[error("Value '{value}' is not one of the allowed values of {path}")]
    NotAllowed { path: String, value: String },

    #[error("Type mismatch for {path}: expected {expected}")]
    TypeMismatch { path: String, expected: String },

    #[error("Collection operation '{operation}' failed: {reason}")]
    Collection { operation: String, reason: String },

    #[error("Child order error: {0}")]
    ChildOrder(String),

    #[error("Update targets widget '{target}', not '{widget}'")]
    WrongWidget { target: String, widget: String },

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

impl PropsError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn collection(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Collection {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PropsError>;
