//! Board types: the per-member task tracker seeded from a roadmap.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Idea, Roadmap};

/// A task board for an accepted idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,

    /// The idea this board executes.
    pub idea: Idea,

    /// The roadmap the board was seeded from. Replaced on regeneration.
    pub roadmap: Roadmap,

    /// Members in display order, each with an independent task list.
    pub members: Vec<MemberTasks>,

    pub created_at: Timestamp,
}

/// One member's ordered task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberTasks {
    pub name: String,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_hours: Option<f32>,
    pub completed: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    /// Case-insensitive: `"high"`, `"High"`, and `"HIGH"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}
