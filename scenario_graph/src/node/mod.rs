//! Node definitions for the scenario graph.

mod choice;

pub use choice::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Unique identifier for a node, taken from its key in the scenario document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from any string-like key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the scenario: display text plus the choices leading out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    /// Ordered outgoing choices. Empty marks a terminal node.
    pub choices: Vec<Choice>,
}

impl Node {
    /// Create a terminal node with the given text.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Append a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// A node with no outgoing choices ends interactive play.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }

    /// Get a choice by its position in the node's choice list.
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    /// Find a choice by its label.
    pub fn choice_by_label(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_terminal() {
        let end = Node::new("end", "The fire is out.");
        assert!(end.is_terminal());

        let start = Node::new("start", "Smoke fills the hall.").with_choice(Choice::new("Run", "end"));
        assert!(!start.is_terminal());
        assert_eq!(start.choice(0).map(|c| c.label.as_str()), Some("Run"));
        assert!(start.choice(1).is_none());
    }

    #[test]
    fn test_choice_by_label() {
        let node = Node::new("start", "Smoke fills the hall.")
            .with_choice(Choice::new("Run", "exit"))
            .with_choice(Choice::new("Wait", "hall"));

        assert_eq!(node.choice_by_label("Wait").unwrap().next, NodeId::from("hall"));
        assert!(node.choice_by_label("Hide").is_none());
    }

    #[test]
    fn test_node_id_lookup_by_str() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(NodeId::from("start"), 1);
        assert_eq!(map.get("start"), Some(&1));
        assert_eq!(NodeId::new("start").to_string(), "start");
    }
}
