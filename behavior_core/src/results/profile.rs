//! Profile building blocks: reaction classification, trait scores, radar axes.

use serde::{Deserialize, Serialize};

/// Narrative classification of the average response time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionProfile {
    /// Below the fast threshold.
    Instinctive,
    /// From the fast threshold up to, not including, the hesitant threshold.
    Reflective,
    /// At or above the hesitant threshold.
    Hesitant,
}

impl ReactionProfile {
    pub fn label(&self) -> &'static str {
        match self {
            ReactionProfile::Instinctive => "fast/instinctive",
            ReactionProfile::Reflective => "reflective",
            ReactionProfile::Hesitant => "hesitant/cautious",
        }
    }

    /// How the user reacted, phrased to complete "your behavior showed ...".
    pub fn behavior(&self) -> &'static str {
        match self {
            ReactionProfile::Instinctive => {
                "a quick, almost instinctive capacity to react in the face of danger"
            }
            ReactionProfile::Reflective => {
                "a considered responsiveness, with decisions taken quickly but without haste"
            }
            ReactionProfile::Hesitant => "a degree of hesitation or heightened caution when deciding",
        }
    }

    /// Interpretation of the average response time.
    pub fn description(&self) -> &'static str {
        match self {
            ReactionProfile::Instinctive => {
                "Instinctive reaction: you decide very quickly, which can signal confidence or impulsiveness."
            }
            ReactionProfile::Reflective => {
                "Reflective reaction: your choices show an ability to analyse quickly under pressure."
            }
            ReactionProfile::Hesitant => {
                "Hesitant reaction: you take your time, which may reflect a need for certainty or a fear of getting it wrong."
            }
        }
    }
}

impl std::fmt::Display for ReactionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How many times a trait was granted across the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitScore {
    pub name: String,
    pub count: u32,
}

/// One axis of the radar profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub name: String,
    pub count: u32,
}

/// Grant counts over the fixed, ordered set of canonical traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RadarProfile {
    pub axes: Vec<RadarAxis>,
}

impl RadarProfile {
    /// The counts alone, in axis order.
    pub fn values(&self) -> Vec<u32> {
        self.axes.iter().map(|a| a.count).collect()
    }

    /// Get the count for an axis, if it is one.
    pub fn count(&self, name: &str) -> Option<u32> {
        self.axes.iter().find(|a| a.name == name).map(|a| a.count)
    }

    /// True when no canonical trait was ever granted.
    pub fn is_flat(&self) -> bool {
        self.axes.iter().all(|a| a.count == 0)
    }
}
