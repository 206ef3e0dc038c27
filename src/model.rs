//! Core data model for Huddle.
//!
//! These types are shared between the triage engine, the backend sources,
//! and the task tracker: ideas, review decisions, teams, roadmaps, and boards.

mod board;
mod decision;
mod idea;
mod roadmap;
mod team;

pub use board::{Board, MemberTasks, Priority, Task};
pub use decision::{DecisionStatus, ReviewDecision};
pub use idea::Idea;
pub use roadmap::{MemberPlan, Phase, PhaseTask, PlannedTask, Risk, Roadmap};
pub use team::{Team, TeamMember};

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` like a missing key. Pair with `#[serde(default)]`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
