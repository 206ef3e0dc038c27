//! Team types, as supplied by the team provider.

use serde::{Deserialize, Serialize};

/// The current user's team: read-only input to idea generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub members: Vec<TeamMember>,
}

/// A team member and their self-reported skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "_id", default, deserialize_with = "super::null_as_default")]
    pub id: String,

    pub name: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub skills: Vec<String>,
}
