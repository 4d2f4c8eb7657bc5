//! Results Engine - derives a behavioral report from a finished session.
//!
//! The derivation works as follows:
//! 1. **Average**: Mean of all recorded response times, rounded to hundredths
//! 2. **Scoring**: Count every trait grant across the history, repeats included
//! 3. **Ranking**: Stable-sort scores by count, keep the top few as dominant
//! 4. **Classification**: Bucket the average against the two breakpoints
//! 5. **Radar**: Project scores onto the canonical trait axes

mod profile;

pub use profile::*;

use serde::Serialize;

use crate::config::ProfileConfig;
use crate::error::ResultsError;
use crate::session::{round_hundredths, Clock, HistoryEntry, SessionState, TimingEntry};

/// Computes reports. Holds only configuration, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct ResultsEngine {
    config: ProfileConfig,
}

impl ResultsEngine {
    /// Create a results engine with the given configuration.
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Create a results engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ProfileConfig::default())
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Build the report for a session.
    ///
    /// Pure: the session is not modified and repeated calls agree. Fails with
    /// `EmptySession` when no choice was ever timed.
    pub fn compute<C: Clock>(&self, state: &SessionState<C>) -> Result<BehaviorReport, ResultsError> {
        let average = self.average_time(state.timings())?;
        let scores = self.trait_scores(state.history());

        Ok(BehaviorReport {
            average_response_secs: average,
            classification: self.classify(average),
            distinct_traits: state.traits().to_vec(),
            history: state.history().to_vec(),
            timings: state.timings().to_vec(),
            dominant_traits: self.dominant_traits(&scores),
            radar: self.radar(&scores),
            trait_scores: scores,
        })
    }

    /// Mean response time in seconds, rounded to hundredths.
    pub fn average_time(&self, timings: &[TimingEntry]) -> Result<f64, ResultsError> {
        if timings.is_empty() {
            return Err(ResultsError::EmptySession);
        }
        let total: f64 = timings.iter().map(|t| t.time).sum();
        Ok(round_hundredths(total / timings.len() as f64))
    }

    /// Bucket an average time. Both intervals are half-open.
    pub fn classify(&self, average_secs: f64) -> ReactionProfile {
        if average_secs < self.config.fast_threshold_secs {
            ReactionProfile::Instinctive
        } else if average_secs < self.config.hesitant_threshold_secs {
            ReactionProfile::Reflective
        } else {
            ReactionProfile::Hesitant
        }
    }

    /// Count every trait grant, in order of first grant.
    ///
    /// Unlike the session's distinct trait list, a trait granted by several
    /// transitions is counted once per grant.
    pub fn trait_scores(&self, history: &[HistoryEntry]) -> Vec<TraitScore> {
        let mut scores: Vec<TraitScore> = Vec::new();

        for entry in history {
            for name in &entry.traits {
                match scores.iter_mut().find(|s| &s.name == name) {
                    Some(score) => score.count += 1,
                    None => scores.push(TraitScore {
                        name: name.clone(),
                        count: 1,
                    }),
                }
            }
        }

        scores
    }

    /// The highest-scoring trait names. Ties keep first-grant order.
    pub fn dominant_traits(&self, scores: &[TraitScore]) -> Vec<String> {
        let mut ranked: Vec<&TraitScore> = scores.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.count.cmp(&a.count));

        ranked
            .into_iter()
            .take(self.config.dominant_trait_count)
            .map(|s| s.name.clone())
            .collect()
    }

    /// Project scores onto the canonical axes; absent traits score zero.
    pub fn radar(&self, scores: &[TraitScore]) -> RadarProfile {
        let axes = self
            .config
            .canonical_traits
            .iter()
            .map(|name| RadarAxis {
                name: name.clone(),
                count: scores
                    .iter()
                    .find(|s| &s.name == name)
                    .map(|s| s.count)
                    .unwrap_or(0),
            })
            .collect();

        RadarProfile { axes }
    }
}

/// Everything derived from a finished session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorReport {
    pub average_response_secs: f64,
    pub classification: ReactionProfile,
    /// Each trait once, in order of first grant.
    pub distinct_traits: Vec<String>,
    pub history: Vec<HistoryEntry>,
    pub timings: Vec<TimingEntry>,
    /// Grant counts in order of first grant.
    pub trait_scores: Vec<TraitScore>,
    pub dominant_traits: Vec<String>,
    pub radar: RadarProfile,
}

impl BehaviorReport {
    /// Serialize the report for an external renderer.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render the report as a readable behavioral summary.
    pub fn to_summary_string(&self) -> String {
        let mut out = String::new();

        out.push_str("## Behavioral Analysis\n");
        out.push_str(&format!(
            "During this scenario, your behavior showed {}. ",
            self.classification.behavior()
        ));
        if self.dominant_traits.is_empty() {
            out.push_str("No notable behavioral trait was identified.");
        } else {
            out.push_str(&format!(
                "Your most notable behavioral traits were: {}.",
                self.dominant_traits.join(", ")
            ));
        }
        out.push_str("\n\n");

        out.push_str("## Detected Traits\n");
        if self.distinct_traits.is_empty() {
            out.push_str("No distinct trait detected.\n");
        } else {
            out.push_str(&self.distinct_traits.join(", "));
            out.push('\n');
        }
        out.push('\n');

        out.push_str("## Choice History\n");
        for step in &self.history {
            out.push_str(&format!("- {} -> {} -> {}\n", step.from, step.label, step.to));
        }
        out.push('\n');

        out.push_str("## Response Time per Scene\n");
        for timing in &self.timings {
            out.push_str(&format!(
                "- {} -> {} sec ({})\n",
                timing.scene, timing.time, timing.choice
            ));
        }
        out.push('\n');

        out.push_str("## Average Response Time\n");
        out.push_str(&format!("Average: {} sec\n", self.average_response_secs));
        out.push_str(self.classification.description());
        out.push('\n');

        out
    }
}
