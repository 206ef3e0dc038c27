//! Backend sources: the team roster, idea generation, and roadmap generation.
//!
//! The triage engine never calls these itself. The surrounding flow asks a
//! source for a batch and hands the result to the workspace.

mod http;
mod wire;

use serde::Serialize;

use crate::model::{Idea, Roadmap, Team};

pub use http::HttpBackend;

/// Failures talking to the backend. All of them are retryable by the user.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("backend unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = core::result::Result<T, SourceError>;

/// Supplies the current team roster.
pub trait TeamProvider {
    fn fetch_team(&self) -> Result<Team>;
}

/// Proposes candidate ideas for a team and a free-text brief.
///
/// May return an empty batch.
pub trait IdeaSource {
    fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<Idea>>;
}

/// Turns an accepted idea into an execution plan.
pub trait RoadmapSource {
    fn generate_roadmap(&self, idea: &Idea) -> Result<Roadmap>;
}

/// Body of an idea generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRequest {
    pub team: Vec<MemberSkills>,
    pub project_requirements: String,
}

/// A member as the idea source sees them: skills joined into one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSkills {
    pub name: String,
    pub skills: String,
}

impl IdeaRequest {
    pub fn from_team(team: &Team, requirements: &str) -> Self {
        Self {
            team: team
                .members
                .iter()
                .map(|m| MemberSkills {
                    name: m.name.clone(),
                    skills: m.skills.join(", "),
                })
                .collect(),
            project_requirements: requirements.to_string(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::TeamMember;

    #[test]
    fn request_joins_skills_per_member() {
        let team = Team {
            name: "Night Owls".into(),
            members: vec![
                TeamMember {
                    id: "1".into(),
                    name: "Ada".into(),
                    skills: vec!["Rust".into(), "SQL".into()],
                },
                TeamMember {
                    id: "2".into(),
                    name: "Grace".into(),
                    skills: vec![],
                },
            ],
        };

        let request = IdeaRequest::from_team(&team, "climate, 48h");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "team": [
                    {"name": "Ada", "skills": "Rust, SQL"},
                    {"name": "Grace", "skills": ""}
                ],
                "projectRequirements": "climate, 48h"
            })
        );
    }
}
