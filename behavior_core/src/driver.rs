//! Driver - the command loop between a session and a presentation layer.
//!
//! The core never redraws on its own. Each pass the driver asks the
//! presenter to render the current node, applies the selected choice as one
//! command, and loops; on a terminal node it computes the outcome once.

use scenario_graph::{Node, ScenarioGraph};

use crate::error::{EngineError, ResultsError};
use crate::results::{BehaviorReport, ResultsEngine};
use crate::session::{Clock, SessionState};

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Report(BehaviorReport),
    /// The session ended without any timed choice.
    NoTimingData,
}

/// How a driver run ended.
#[derive(Debug)]
pub enum RunEnd {
    /// A terminal node was reached and its outcome rendered.
    Finished(SessionOutcome),
    /// The presenter stopped selecting choices.
    Abandoned,
    /// A lookup or transition failed; the session was left as it was.
    Broken(EngineError),
}

/// The presentation layer: displays nodes and results, collects choices.
pub trait Presenter {
    /// Show a node and return the index of the selected choice, or `None` to stop.
    fn render_node(&mut self, node: &Node) -> Option<usize>;

    /// Show the outcome of a finished session.
    fn render_outcome(&mut self, outcome: &SessionOutcome);

    /// Tell the user the scenario is broken.
    fn render_error(&mut self, error: &EngineError);

    /// Asked after an outcome is shown. Returning true restarts the session.
    fn restart_requested(&mut self) -> bool {
        false
    }
}

/// Runs sessions against a presenter.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    engine: ResultsEngine,
}

impl Driver {
    pub fn new(engine: ResultsEngine) -> Self {
        Self { engine }
    }

    pub fn with_defaults() -> Self {
        Self::new(ResultsEngine::with_defaults())
    }

    pub fn engine(&self) -> &ResultsEngine {
        &self.engine
    }

    /// Compute the outcome of a session. An empty session is a valid outcome.
    pub fn outcome<C: Clock>(&self, state: &SessionState<C>) -> SessionOutcome {
        match self.engine.compute(state) {
            Ok(report) => SessionOutcome::Report(report),
            Err(ResultsError::EmptySession) => SessionOutcome::NoTimingData,
        }
    }

    /// Drive `state` until it finishes, is abandoned, or breaks.
    pub fn run<C, P>(&self, graph: &ScenarioGraph, state: &mut SessionState<C>, presenter: &mut P) -> RunEnd
    where
        C: Clock,
        P: Presenter,
    {
        loop {
            let node = match state.visit(graph) {
                Ok(node) => node,
                Err(e) => return Self::broken(presenter, e.into()),
            };

            if node.is_terminal() {
                let outcome = self.outcome(state);
                presenter.render_outcome(&outcome);
                if presenter.restart_requested() {
                    state.reset();
                    continue;
                }
                return RunEnd::Finished(outcome);
            }

            let Some(index) = presenter.render_node(node) else {
                return RunEnd::Abandoned;
            };

            if let Err(e) = state.choose(graph, index) {
                return Self::broken(presenter, e.into());
            }
        }
    }

    fn broken<P: Presenter>(presenter: &mut P, error: EngineError) -> RunEnd {
        tracing::warn!(error = %error, "session broken");
        presenter.render_error(&error);
        RunEnd::Broken(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ReactionProfile;
    use crate::session::ManualClock;
    use scenario_graph::{Choice, NodeId, ScenarioError};
    use std::collections::VecDeque;

    const FIRE_SCENARIO: &str = include_str!("../../scenarios/fire_scenario.json");

    /// Replays fixed selections, each after a fixed think time.
    struct ScriptedPresenter {
        clock: ManualClock,
        selections: VecDeque<(usize, f64)>,
        restarts: u32,
        rendered: Vec<String>,
        outcomes: Vec<SessionOutcome>,
        errors: Vec<String>,
    }

    impl ScriptedPresenter {
        fn new(clock: ManualClock, selections: &[(usize, f64)]) -> Self {
            Self {
                clock,
                selections: selections.iter().copied().collect(),
                restarts: 0,
                rendered: Vec::new(),
                outcomes: Vec::new(),
                errors: Vec::new(),
            }
        }
    }

    impl Presenter for ScriptedPresenter {
        fn render_node(&mut self, node: &Node) -> Option<usize> {
            self.rendered.push(node.id.to_string());
            let (index, secs) = self.selections.pop_front()?;
            self.clock.advance_secs(secs);
            Some(index)
        }

        fn render_outcome(&mut self, outcome: &SessionOutcome) {
            self.outcomes.push(outcome.clone());
        }

        fn render_error(&mut self, error: &EngineError) {
            self.errors.push(error.to_string());
        }

        fn restart_requested(&mut self) -> bool {
            if self.restarts > 0 {
                self.restarts -= 1;
                true
            } else {
                false
            }
        }
    }

    fn fire_graph() -> ScenarioGraph {
        ScenarioGraph::from_json_str(FIRE_SCENARIO).unwrap()
    }

    #[test]
    fn test_run_fire_scenario() {
        let graph = fire_graph();
        assert!(graph.dangling_targets().is_empty());

        let clock = ManualClock::new();
        let mut state = SessionState::with_clock(graph.start().clone(), clock.clone());
        let mut presenter = ScriptedPresenter::new(clock, &[(1, 8.0), (0, 12.0)]);

        let end = Driver::with_defaults().run(&graph, &mut state, &mut presenter);

        let report = match end {
            RunEnd::Finished(SessionOutcome::Report(report)) => report,
            other => panic!("expected a report, got {:?}", other),
        };
        assert_eq!(presenter.rendered, vec!["start", "colleagues"]);
        assert_eq!(state.current(), &NodeId::from("stairs"));
        assert_eq!(report.average_response_secs, 10.0);
        assert_eq!(report.classification, ReactionProfile::Reflective);
        assert_eq!(report.distinct_traits, vec!["protecteur", "pragmatique"]);
        assert_eq!(report.dominant_traits, vec!["protecteur", "pragmatique"]);
        assert_eq!(report.radar.values(), vec![0, 2, 1, 0]);
        assert_eq!(presenter.outcomes.len(), 1);
    }

    #[test]
    fn test_immediately_terminal_start() {
        let graph = ScenarioGraph::from_nodes([Node::new("start", "It is already over.")]);
        let mut state = SessionState::for_graph(&graph);
        let mut presenter = ScriptedPresenter::new(ManualClock::new(), &[]);

        let end = Driver::with_defaults().run(&graph, &mut state, &mut presenter);

        assert!(matches!(end, RunEnd::Finished(SessionOutcome::NoTimingData)));
        assert!(presenter.rendered.is_empty());
    }

    #[test]
    fn test_abandoned_run() {
        let graph = fire_graph();
        let clock = ManualClock::new();
        let mut state = SessionState::with_clock("start", clock.clone());
        let mut presenter = ScriptedPresenter::new(clock, &[(0, 1.0)]);

        let end = Driver::with_defaults().run(&graph, &mut state, &mut presenter);

        assert!(matches!(end, RunEnd::Abandoned));
        assert_eq!(state.current(), &NodeId::from("corridor"));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_broken_edge_is_reported() {
        let graph = ScenarioGraph::from_nodes([
            Node::new("start", "A").with_choice(Choice::new("Open the door", "cellar"))
        ]);
        let clock = ManualClock::new();
        let mut state = SessionState::with_clock("start", clock.clone());
        let mut presenter = ScriptedPresenter::new(clock, &[(0, 2.0)]);

        let end = Driver::with_defaults().run(&graph, &mut state, &mut presenter);

        let error = match end {
            RunEnd::Broken(error) => error,
            other => panic!("expected a broken run, got {:?}", other),
        };
        assert!(matches!(error, EngineError::Scenario(ScenarioError::UnknownNode(_))));
        assert!(error.is_recoverable());
        assert_eq!(presenter.errors, vec!["unknown node 'cellar'"]);
    }

    #[test]
    fn test_rejected_transition_leaves_state() {
        let graph = fire_graph();
        let clock = ManualClock::new();
        let mut state = SessionState::with_clock("start", clock.clone());
        let mut presenter = ScriptedPresenter::new(clock, &[(9, 1.0)]);
        let before = state.snapshot();

        let end = Driver::with_defaults().run(&graph, &mut state, &mut presenter);

        assert!(matches!(
            end,
            RunEnd::Broken(EngineError::Scenario(ScenarioError::InvalidChoice { .. }))
        ));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_after_outcome() {
        let graph = fire_graph();
        let clock = ManualClock::new();
        let mut state = SessionState::with_clock("start", clock.clone());
        let mut presenter = ScriptedPresenter::new(clock, &[(2, 20.0), (0, 16.0), (0, 1.0), (1, 2.0)]);
        presenter.restarts = 1;

        let end = Driver::with_defaults().run(&graph, &mut state, &mut presenter);

        assert_eq!(presenter.outcomes.len(), 2);
        match &presenter.outcomes[0] {
            SessionOutcome::Report(first) => {
                assert_eq!(first.classification, ReactionProfile::Hesitant);
                assert_eq!(first.dominant_traits, vec!["suiveur"]);
            }
            other => panic!("expected a report, got {:?}", other),
        }

        let second = match end {
            RunEnd::Finished(SessionOutcome::Report(second)) => second,
            other => panic!("expected a report, got {:?}", other),
        };
        assert_eq!(second.classification, ReactionProfile::Instinctive);
        assert_eq!(second.distinct_traits, vec!["impulsif"]);
        assert_eq!(second.trait_scores[0].count, 2);
        assert_eq!(state.history().len(), 2);
    }
}
