//! Errors raised while loading or traversing a scenario.

use thiserror::Error;

use crate::node::NodeId;

/// Everything that can go wrong with scenario data.
///
/// Load-time variants (`Malformed`, `Io`, `UnsupportedFormat`) are fatal.
/// The others surface during traversal and leave session state untouched.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The document is not a mapping of node id to node, or a node is missing
    /// a required field or has one of the wrong shape.
    #[error("malformed scenario: {reason}")]
    Malformed { reason: String },

    /// A lookup referenced a node absent from the graph.
    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),

    /// A choice carries a consequences payload that cannot be applied.
    #[error("invalid consequences on choice '{label}': {reason}")]
    InvalidConsequences { label: String, reason: String },

    /// A choice index outside the current node's choice list.
    #[error("choice {index} is out of range ({available} available)")]
    InvalidChoice { index: usize, available: usize },

    /// The scenario file extension is neither `json` nor `toml`.
    #[error("unsupported scenario format '{0}'")]
    UnsupportedFormat(String),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
}

impl ScenarioError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ScenarioError::Malformed {
            reason: reason.into(),
        }
    }

    /// True for errors that should abort startup rather than a single transition.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ScenarioError::Malformed { .. } | ScenarioError::UnsupportedFormat(_) | ScenarioError::Io(_)
        )
    }
}
