//! Roadmap types: the execution plan for an accepted idea.
//!
//! Every collection and text field here is optional on the wire. Missing
//! keys and explicit nulls both default to empty.
//! Generated plans are loose about shapes, so hour estimates accept either
//! a number or a string like `"6"` or `"6h"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A structured execution plan: phases, milestones, and risks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub phases: Vec<Phase>,

    #[serde(default)]
    pub total_duration: Option<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub key_milestones: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub risks_and_mitigations: Vec<Risk>,

    /// Per-member starting to-do lists, keyed by member name.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub member_tasks: BTreeMap<String, MemberPlan>,
}

/// One phase of the plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub duration: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<PhaseTask>,
}

/// A task inside a phase, with optional subtasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTask {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub subtasks: Vec<String>,

    #[serde(default, deserialize_with = "lenient_hours")]
    pub estimated_hours: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Risk {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub risk: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub mitigation: String,
}

/// A member's seeded to-do list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPlan {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub todo_list: Vec<PlannedTask>,
}

/// A to-do item as proposed by the roadmap source.
///
/// `priority` stays a free string here; the tracker maps it to a
/// [`Priority`](super::Priority) when seeding a board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTask {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub task: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default, deserialize_with = "lenient_hours")]
    pub estimated_hours: Option<f32>,
}

/// Accepts `4`, `4.5`, `"4"`, `"4h"`, or null. Unparseable text becomes `None`.
fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f32),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().trim_end_matches('h').trim().parse().ok(),
        None => None,
    })
}
