//! OptimizationSettings - per-request optimization flags

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Optimization flags; every flag is on unless explicitly set to `false`
///
/// Deserialization never fails: a non-object value yields the defaults and
/// a flag holding anything other than the boolean `false` stays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationSettings {
    /// Add concrete examples where they help
    pub include_examples: bool,
    /// Add explicit constraints (length, format, scope)
    pub add_constraints: bool,
    /// Rewrite ambiguous wording
    pub improve_clarity: bool,
    /// Organize the prompt into sections
    pub add_structure: bool,
}

impl OptimizationSettings {
    /// Resolve settings from loosely typed JSON
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        let flag = |key: &str| !matches!(fields.get(key), Some(Value::Bool(false)));

        Self {
            include_examples: flag("includeExamples"),
            add_constraints: flag("addConstraints"),
            improve_clarity: flag("improveClarity"),
            add_structure: flag("addStructure"),
        }
    }
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        Self {
            include_examples: true,
            add_constraints: true,
            improve_clarity: true,
            add_structure: true,
        }
    }
}

impl<'de> Deserialize<'de> for OptimizationSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}
