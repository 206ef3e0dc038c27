//! Idea: one proposed project concept.

use serde::{Deserialize, Serialize};

/// A proposed project concept with its fit metadata.
///
/// Immutable once produced by the idea source. The list fields may be empty.
/// Serialized with the field names the roadmap endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub title: String,

    pub description: String,

    /// Labelled challenge rating, e.g. `"Medium"`.
    #[serde(rename = "challenge")]
    pub difficulty: String,

    /// Team/skill fit, `0..=100`.
    #[serde(rename = "stackMatch")]
    pub match_score: u8,

    #[serde(default)]
    pub workflow: Vec<String>,

    #[serde(default)]
    pub tech_stack: Vec<String>,

    #[serde(default)]
    pub features: Vec<String>,
}
