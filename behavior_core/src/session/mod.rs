//! Session state - the per-user scenario state machine.
//!
//! Each node id the user occupies is a state and each applied `Choice` is a
//! transition. A session starts on the graph's start node with the scene
//! clock already running, and reaching a node without choices ends play.

mod clock;
mod registry;

pub use clock::*;
pub use registry::*;

use scenario_graph::{Choice, Node, NodeId, ScenarioError, ScenarioGraph};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One transition, recorded in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    /// Traits listed in the choice's consequences, including ones already held.
    pub traits: Vec<String>,
}

/// Time taken to make one choice. Parallel to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEntry {
    pub scene: NodeId,
    pub choice: String,
    /// Seconds, rounded to hundredths.
    pub time: f64,
}

/// What a successful `apply_choice` did.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    pub elapsed_secs: f64,
    /// Traits this choice granted that the session did not hold yet.
    pub newly_granted: Vec<String>,
}

/// Clock-free view of a session, comparable and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current: NodeId,
    pub traits: Vec<String>,
    pub history: Vec<HistoryEntry>,
    pub timings: Vec<TimingEntry>,
}

/// Mutable traversal state of one user through a scenario.
///
/// `history` and `timings` always have the same length, and the distinct
/// trait list only grows until `reset`.
#[derive(Debug, Clone)]
pub struct SessionState<C: Clock = MonotonicClock> {
    start: NodeId,
    current: NodeId,
    traits: Vec<String>,
    history: Vec<HistoryEntry>,
    timings: Vec<TimingEntry>,
    scene_started: Instant,
    clocked_node: NodeId,
    clock: C,
}

impl SessionState<MonotonicClock> {
    /// Start a session on `start` timed by the monotonic clock.
    pub fn new(start: impl Into<NodeId>) -> Self {
        Self::with_clock(start, MonotonicClock)
    }

    /// Start a session on the graph's start node.
    pub fn for_graph(graph: &ScenarioGraph) -> Self {
        Self::new(graph.start().clone())
    }
}

impl<C: Clock> SessionState<C> {
    /// Start a session on `start` timed by `clock`.
    pub fn with_clock(start: impl Into<NodeId>, clock: C) -> Self {
        let start = start.into();
        Self {
            current: start.clone(),
            clocked_node: start.clone(),
            start,
            traits: Vec::new(),
            history: Vec::new(),
            timings: Vec::new(),
            scene_started: clock.now(),
            clock,
        }
    }

    /// Restart the scene clock if the current node has not been clocked yet.
    ///
    /// Calling this again on the same node is a no-op.
    pub fn start_clock(&mut self) {
        if self.clocked_node != self.current {
            self.scene_started = self.clock.now();
            self.clocked_node = self.current.clone();
            tracing::debug!(node = %self.current, "scene clock started");
        }
    }

    /// Look up the current node for display, starting its clock on first visit.
    pub fn visit<'g>(&mut self, graph: &'g ScenarioGraph) -> Result<&'g Node, ScenarioError> {
        let node = graph.get(&self.current)?;
        self.start_clock();
        Ok(node)
    }

    /// Look up the current node without touching the clock.
    pub fn current_node<'g>(&self, graph: &'g ScenarioGraph) -> Result<&'g Node, ScenarioError> {
        graph.get(&self.current)
    }

    /// Whether the current node ends interactive play.
    pub fn is_terminal(&self, graph: &ScenarioGraph) -> Result<bool, ScenarioError> {
        Ok(self.current_node(graph)?.is_terminal())
    }

    /// Take `choice` from the current node.
    ///
    /// The caller guarantees the choice belongs to the current node, and the
    /// target is not checked here; a missing target fails on the next lookup.
    /// Invalid consequences reject the transition and leave the state as is.
    pub fn apply_choice(&mut self, choice: &Choice) -> Result<Transition, ScenarioError> {
        let granted = choice.granted_traits().map_err(|e| {
            tracing::warn!(node = %self.current, choice = %choice.label, error = %e, "transition rejected");
            e
        })?;

        let elapsed = self.clock.now().saturating_duration_since(self.scene_started);
        let elapsed_secs = round_hundredths(elapsed.as_secs_f64());

        let mut newly_granted = Vec::new();
        for name in &granted {
            if !self.traits.contains(name) {
                self.traits.push(name.clone());
                newly_granted.push(name.clone());
            }
        }

        let from = std::mem::replace(&mut self.current, choice.next.clone());
        self.history.push(HistoryEntry {
            from: from.clone(),
            to: choice.next.clone(),
            label: choice.label.clone(),
            traits: granted,
        });
        self.timings.push(TimingEntry {
            scene: from.clone(),
            choice: choice.label.clone(),
            time: elapsed_secs,
        });

        tracing::debug!(
            from = %from,
            to = %choice.next,
            label = %choice.label,
            elapsed_secs,
            "choice applied"
        );

        Ok(Transition {
            from,
            to: choice.next.clone(),
            label: choice.label.clone(),
            elapsed_secs,
            newly_granted,
        })
    }

    /// Take the choice at `index` on the current node.
    pub fn choose(&mut self, graph: &ScenarioGraph, index: usize) -> Result<Transition, ScenarioError> {
        let node = graph.get(&self.current)?;
        let choice = node.choice(index).ok_or(ScenarioError::InvalidChoice {
            index,
            available: node.choices.len(),
        })?;
        self.apply_choice(choice)
    }

    /// Return to the initial state: start node, nothing recorded, fresh clock.
    pub fn reset(&mut self) {
        *self = Self::with_clock(self.start.clone(), self.clock.clone());
        tracing::info!(start = %self.start, "session reset");
    }

    pub fn start(&self) -> &NodeId {
        &self.start
    }

    pub fn current(&self) -> &NodeId {
        &self.current
    }

    /// Distinct traits ever granted, in order of first grant.
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn timings(&self) -> &[TimingEntry] {
        &self.timings
    }

    /// Copy out everything except the clock.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current: self.current.clone(),
            traits: self.traits.clone(),
            history: self.history.clone(),
            timings: self.timings.clone(),
        }
    }
}
