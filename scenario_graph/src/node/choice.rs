//! Choices and the consequences they carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NodeId;
use crate::error::ScenarioError;

/// A labeled edge from one node to another, optionally granting traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub next: NodeId,

    /// Raw consequences payload, validated when the choice is applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequences: Option<Value>,
}

impl Choice {
    /// Create a choice without consequences.
    pub fn new(label: impl Into<String>, next: impl Into<NodeId>) -> Self {
        Self {
            label: label.into(),
            next: next.into(),
            consequences: None,
        }
    }

    /// Grant the given traits when this choice is taken.
    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let traits: Vec<Value> = traits.into_iter().map(|t| Value::String(t.into())).collect();
        let mut consequences = serde_json::Map::new();
        consequences.insert("traits".to_string(), Value::Array(traits));
        self.consequences = Some(Value::Object(consequences));
        self
    }

    /// Set an arbitrary consequences payload.
    pub fn with_consequences(mut self, consequences: Value) -> Self {
        self.consequences = Some(consequences);
        self
    }

    /// The trait names this choice grants, in declaration order.
    ///
    /// Absent consequences grant nothing. A payload that is not an object, or
    /// whose `traits` entry is not a list of strings, is rejected.
    pub fn granted_traits(&self) -> Result<Vec<String>, ScenarioError> {
        let consequences = match &self.consequences {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(value) => value,
        };

        let fields = consequences
            .as_object()
            .ok_or_else(|| self.invalid(format!("expected an object, found {}", kind(consequences))))?;

        let traits = match fields.get("traits") {
            None => return Ok(Vec::new()),
            Some(Value::Array(traits)) => traits,
            Some(other) => {
                return Err(self.invalid(format!("'traits' must be a list, found {}", kind(other))))
            }
        };

        traits
            .iter()
            .enumerate()
            .map(|(i, t)| {
                t.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(format!("trait #{} is {}, not a string", i, kind(t))))
            })
            .collect()
    }

    fn invalid(&self, reason: String) -> ScenarioError {
        ScenarioError::InvalidConsequences {
            label: self.label.clone(),
            reason,
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
