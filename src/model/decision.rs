//! Review decisions: the audit trail of a triage session.

use serde::{Deserialize, Serialize};

use super::Idea;

/// One recorded verdict on an idea.
///
/// Decisions are appended to the session's log and never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDecision {
    pub idea: Idea,
    pub status: DecisionStatus,
}

/// What the reviewer did with an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionStatus {
    /// Chosen. Ends the session.
    Accepted,

    /// Passed over for good.
    Skipped,

    /// Set aside for the second look.
    Deferred,
}
