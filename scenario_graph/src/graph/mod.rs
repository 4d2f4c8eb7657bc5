//! Scenario graph - the immutable node mapping shared by every session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::ScenarioError;
use crate::node::{Choice, Node, NodeId};

/// Node a session starts on unless the graph says otherwise.
pub const DEFAULT_START_NODE: &str = "start";

/// On-disk shape of a node. The id comes from the document key.
#[derive(Debug, Deserialize)]
struct NodeDocument {
    text: String,
    /// Absent and empty both mean terminal.
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

impl NodeDocument {
    fn into_node(self, id: NodeId) -> Node {
        Node {
            id,
            text: self.text,
            choices: self.choices.unwrap_or_default(),
        }
    }
}

/// The scenario graph.
///
/// Loading is deliberately permissive about edges: a choice may point at a
/// node that is not in the graph, and the missing node only surfaces as
/// `UnknownNode` when a session tries to look it up.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioGraph {
    nodes: HashMap<NodeId, Node>,
    start: NodeId,
}

impl Default for ScenarioGraph {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            start: NodeId::from(DEFAULT_START_NODE),
        }
    }
}

impl ScenarioGraph {
    /// Create an empty graph starting at `"start"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from already-constructed nodes.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            ..Self::default()
        }
    }

    /// Parse a JSON document mapping node ids to nodes.
    pub fn from_json_str(source: &str) -> Result<Self, ScenarioError> {
        let document: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| ScenarioError::malformed(format!("invalid JSON: {}", e)))?;

        let entries = match document {
            serde_json::Value::Object(entries) => entries,
            _ => {
                return Err(ScenarioError::malformed(
                    "document must be a mapping of node id to node",
                ))
            }
        };

        let mut nodes = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            let doc: NodeDocument = serde_json::from_value(value)
                .map_err(|e| ScenarioError::malformed(format!("node '{}': {}", key, e)))?;
            let id = NodeId::from(key);
            nodes.insert(id.clone(), doc.into_node(id));
        }

        Ok(Self::loaded(nodes))
    }

    /// Parse a TOML document where each top-level table is a node.
    pub fn from_toml_str(source: &str) -> Result<Self, ScenarioError> {
        let document: toml::Table = toml::from_str(source)
            .map_err(|e| ScenarioError::malformed(format!("invalid TOML: {}", e)))?;

        let mut nodes = HashMap::with_capacity(document.len());
        for (key, value) in document {
            let doc: NodeDocument = value
                .try_into()
                .map_err(|e| ScenarioError::malformed(format!("node '{}': {}", key, e)))?;
            let id = NodeId::from(key);
            nodes.insert(id.clone(), doc.into_node(id));
        }

        Ok(Self::loaded(nodes))
    }

    /// Read a scenario file, picking the parser from its extension.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            other => Err(ScenarioError::UnsupportedFormat(other.to_string())),
        }
    }

    fn loaded(nodes: HashMap<NodeId, Node>) -> Self {
        let graph = Self {
            nodes,
            ..Self::default()
        };
        tracing::info!(nodes = graph.len(), start = %graph.start, "scenario loaded");
        graph
    }

    /// Start sessions on a different node.
    pub fn with_start_node(mut self, start: impl Into<NodeId>) -> Self {
        self.start = start.into();
        self
    }

    /// The id sessions start on.
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    /// The node sessions start on.
    pub fn start_node(&self) -> Result<&Node, ScenarioError> {
        self.get(&self.start)
    }

    /// Get a node by id.
    pub fn get(&self, id: &NodeId) -> Result<&Node, ScenarioError> {
        self.nodes.get(id).ok_or_else(|| {
            tracing::warn!(node = %id, "lookup of unknown node");
            ScenarioError::UnknownNode(id.clone())
        })
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Choice edges whose target is missing, as `(from, target)` pairs sorted by id.
    ///
    /// Purely informational; loading never rejects these.
    pub fn dangling_targets(&self) -> Vec<(NodeId, NodeId)> {
        let mut dangling = Vec::new();
        for node in self.nodes.values() {
            for choice in &node.choices {
                if !self.nodes.contains_key(&choice.next) {
                    dangling.push((node.id.clone(), choice.next.clone()));
                }
            }
        }
        dangling.sort();
        dangling
    }
}
