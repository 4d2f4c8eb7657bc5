//! Per-user session isolation over one shared scenario graph.

use scenario_graph::ScenarioGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::SessionState;

/// Unique key for a user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns one `SessionState` per user. The graph is read-only and shared.
#[derive(Debug)]
pub struct SessionRegistry {
    graph: Arc<ScenarioGraph>,
    sessions: HashMap<SessionId, SessionState>,
}

impl SessionRegistry {
    pub fn new(graph: Arc<ScenarioGraph>) -> Self {
        Self {
            graph,
            sessions: HashMap::new(),
        }
    }

    /// The scenario every session traverses.
    pub fn graph(&self) -> &Arc<ScenarioGraph> {
        &self.graph
    }

    /// Start a new session on the graph's start node.
    pub fn open(&mut self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, SessionState::for_graph(&self.graph));
        tracing::debug!(session = %id, "session opened");
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&SessionState> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut SessionState> {
        self.sessions.get_mut(&id)
    }

    /// Drop a session, returning its final state.
    pub fn close(&mut self, id: SessionId) -> Option<SessionState> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
