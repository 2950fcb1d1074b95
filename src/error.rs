//! Error types for the drag engine.
//!
//! Configuration problems and host tree failures get their own enums; the engine-level
//! [`SortError`] wraps them so handlers can propagate with `?`.

use crate::host::NodeId;
use thiserror::Error;

/// Errors produced while parsing a selector string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Selector string (or one alternative of a list) is empty
    #[error("empty selector")]
    Empty,

    /// Character that is not part of the supported selector grammar
    #[error("unexpected {ch:?} at byte {pos} in selector {selector:?}")]
    UnexpectedChar { selector: String, ch: char, pos: usize },

    /// `.` or `#` not followed by a name
    #[error("missing name after {prefix:?} at byte {pos} in selector {selector:?}")]
    MissingName { selector: String, prefix: char, pos: usize },

    /// Descendant/child combinators are not supported
    #[error("combinators are not supported in selector {0:?}")]
    Combinator(String),
}

/// Errors raised by host tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Node id does not exist in the host tree
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// Operation needs the node to be attached to the document
    #[error("node {0} is not attached to the document")]
    Detached(NodeId),

    /// Insertion would make a node its own ancestor
    #[error("cannot insert node {child} relative to {reference}: hierarchy request")]
    HierarchyRequest { child: NodeId, reference: NodeId },
}

/// Errors that can occur while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the selector options failed to parse
    #[error("invalid {option}: {source}")]
    Selector {
        option: &'static str,
        #[source]
        source: SelectorError,
    },

    /// Numeric option that must be finite and non-negative
    #[error("invalid {option}: {value}")]
    InvalidValue { option: &'static str, value: f32 },
}

/// Engine-level error
#[derive(Error, Debug)]
pub enum SortError {
    /// Insertion position outside {before, after, in}. Only reachable through a logic defect.
    #[error("position must be \"before\", \"after\" or \"in\", got {0:?}")]
    InvalidPosition(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for engine operations
pub type SortResult<T> = Result<T, SortError>;
