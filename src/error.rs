//! Error types
//!
//! Everything here is locally recoverable. Situations the UI should treat as
//! a negative answer rather than a failure (empty structure, value not found,
//! duplicate insert) are reported through [`crate::step::Outcome`] instead.

use crate::producers::Algorithm;
use crate::structures::graph::NodeId;
use crate::structures::Domain;
use thiserror::Error;

/// Rejections from the cooperative scheduler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A run is already running or paused on this scheduler
    #[error("a run is already in progress")]
    Busy,
}

/// Rejections from the run controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("a run is already in progress")]
    Busy,

    #[error("{algorithm} runs on a {expected}, not a {got}")]
    StructureMismatch {
        algorithm: Algorithm,
        expected: Domain,
        got: Domain,
    },

    #[error("{algorithm} needs a value to work with")]
    MissingValue { algorithm: Algorithm },
}

impl From<SchedulerError> for RunError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::Busy => RunError::Busy,
        }
    }
}

/// Graph mutation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("edge weights must be positive")]
    ZeroWeight,
}

/// Configuration values outside their bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("invalid value for {flag}: {value}")]
    InvalidArgument { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Failures from an explanation service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error("no explanation available for {0}")]
    Unavailable(Algorithm),

    #[error("explanation service failed: {0}")]
    Service(String),
}
