//! Error types for protocol-ir
//!
//! Hard failures only. Property violations found by the analysis are
//! reported as [`Issue`](crate::features::fault_handling::Issue) values and
//! never surface here.

use thiserror::Error;

use crate::config::ConfigError;

/// Protocol ingestion error
///
/// Raised when a protocol description is structurally broken and no model
/// can be built from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestionError {
    /// YAML/JSON syntax error
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A transition or fault handler references a state that is not declared
    #[error("{context} references undefined state '{state}'")]
    UndefinedState { state: String, context: String },

    /// Two states share the same id
    #[error("State '{0}' is declared more than once")]
    DuplicateState(String),

    /// No initial state given, or the given one is undefined
    #[error("Missing initial state: {0}")]
    MissingInitialState(String),

    /// More than one state claims to be initial
    #[error("Ambiguous initial state: '{first}' and '{second}' are both initial")]
    AmbiguousInitialState { first: String, second: String },

    /// Protocol has no states at all
    #[error("Protocol '{0}' declares no states")]
    EmptyProtocol(String),

    /// A state uses a capability/requirement outside the declared vocabulary
    #[error("State '{state}' uses undeclared {kind} '{name}'")]
    UndeclaredName {
        state: String,
        kind: String,
        name: String,
    },

    /// Unsupported document format
    #[error("Unsupported protocol format: {0}")]
    UnsupportedFormat(String),
}

/// Main error type for protocol-ir operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ingestion error
    #[error("Ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error (report output)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Whether the failure blocks a single component only
    pub fn is_ingestion(&self) -> bool {
        matches!(self, ProtocolError::Ingestion(_))
    }
}

/// Result type alias for protocol-ir operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
