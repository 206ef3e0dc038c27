//! Wire shapes for backend responses and the defaults applied when decoding them.
//!
//! Generated ideas are loosely shaped. Missing fields fall back to:
//! title `"Untitled Project"`, description `""`, challenge `"Medium"`, and
//! empty lists. A missing or zero skill match becomes a pseudo-random score
//! in `70..100`.

use rand::Rng;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{Idea, Roadmap, Team};

const UNTITLED: &str = "Untitled Project";
const DEFAULT_CHALLENGE: &str = "Medium";

/// Every success body is wrapped as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct TeamData {
    pub team: Team,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdeasData {
    #[serde(default)]
    pub ideas: Vec<WireIdea>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoadmapData {
    pub roadmap: Roadmap,
}

/// Error bodies carry a human-readable `message` when the backend has one.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireIdea {
    #[serde(default)]
    project_title: Option<String>,

    #[serde(default)]
    brief_description: Option<String>,

    /// Usually a label, sometimes a number.
    #[serde(default)]
    challenging: Option<Value>,

    /// Usually a number, sometimes a numeric string.
    #[serde(default)]
    skill_match: Option<Value>,

    #[serde(default)]
    workflow: Option<Vec<String>>,

    #[serde(default, rename = "techStack")]
    tech_stack: Option<Vec<String>>,

    #[serde(default)]
    key_features: Option<Vec<String>>,
}

impl WireIdea {
    pub(super) fn into_idea<R: Rng + ?Sized>(self, rng: &mut R) -> Idea {
        Idea {
            title: self
                .project_title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            description: self.brief_description.unwrap_or_default(),
            difficulty: challenge_label(self.challenging.as_ref()),
            match_score: match_score(self.skill_match.as_ref())
                .unwrap_or_else(|| rng.random_range(70..100)),
            workflow: self.workflow.unwrap_or_default(),
            tech_stack: self.tech_stack.unwrap_or_default(),
            features: self.key_features.unwrap_or_default(),
        }
    }
}

fn challenge_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => DEFAULT_CHALLENGE.to_string(),
    }
}

/// A usable score in `1..=100`, or `None` when absent, unreadable, or rounding to zero.
fn match_score(value: Option<&Value>) -> Option<u8> {
    let raw = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok()?,
        _ => return None,
    };
    let rounded = raw.round();
    if !rounded.is_finite() || rounded < 1.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = rounded.min(100.0) as u8;
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Idea {
        let wire: WireIdea = serde_json::from_str(json).unwrap();
        wire.into_idea(&mut rand::rng())
    }

    #[test]
    fn full_idea_maps_every_field() {
        let idea = decode(
            r#"{
                "project_title": "Carbon Coach",
                "brief_description": "Nudges for greener commutes",
                "challenging": "Hard",
                "skill_match": 91,
                "workflow": ["Collect trips", "Score"],
                "techStack": ["Rust", "Postgres"],
                "key_features": ["Streaks"]
            }"#,
        );

        assert_eq!(idea.title, "Carbon Coach");
        assert_eq!(idea.description, "Nudges for greener commutes");
        assert_eq!(idea.difficulty, "Hard");
        assert_eq!(idea.match_score, 91);
        assert_eq!(idea.workflow, ["Collect trips", "Score"]);
        assert_eq!(idea.tech_stack, ["Rust", "Postgres"]);
        assert_eq!(idea.features, ["Streaks"]);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let idea = decode("{}");

        assert_eq!(idea.title, UNTITLED);
        assert_eq!(idea.description, "");
        assert_eq!(idea.difficulty, DEFAULT_CHALLENGE);
        assert!((70..100).contains(&idea.match_score));
        assert!(idea.workflow.is_empty());
        assert!(idea.tech_stack.is_empty());
        assert!(idea.features.is_empty());
    }

    #[test]
    fn null_and_empty_values_take_defaults() {
        let idea = decode(
            r#"{"project_title": "", "challenging": null, "workflow": null, "skill_match": 0}"#,
        );

        assert_eq!(idea.title, UNTITLED);
        assert_eq!(idea.difficulty, DEFAULT_CHALLENGE);
        assert!(idea.workflow.is_empty());
        assert!((70..100).contains(&idea.match_score));
    }

    #[test]
    fn numeric_challenge_and_string_score() {
        let idea = decode(r#"{"challenging": 70, "skill_match": "85%"}"#);

        assert_eq!(idea.difficulty, "70");
        assert_eq!(idea.match_score, 85);
    }

    #[test]
    fn score_rounding_to_zero_falls_back() {
        assert_eq!(match_score(Some(&serde_json::json!(0.3))), None);
        assert_eq!(match_score(Some(&serde_json::json!("0.4%"))), None);
        assert_eq!(match_score(Some(&serde_json::json!(0.6))), Some(1));

        let idea = decode(r#"{"skill_match": 0.2}"#);
        assert!((70..100).contains(&idea.match_score));
    }

    #[test]
    fn score_above_hundred_is_clamped() {
        let idea = decode(r#"{"skill_match": 140}"#);
        assert_eq!(idea.match_score, 100);
    }

    #[test]
    fn envelope_with_no_ideas_is_an_empty_batch() {
        let envelope: Envelope<IdeasData> = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(envelope.data.ideas.is_empty());
    }

    #[test]
    fn team_envelope_decodes_members() {
        let json = r#"{"data": {"team": {"name": "Owls", "members": [
            {"_id": "m1", "name": "Ada", "skills": ["Rust"]}
        ]}}}"#;
        let envelope: Envelope<TeamData> = serde_json::from_str(json).unwrap();

        let member = &envelope.data.team.members[0];
        assert_eq!(member.id, "m1");
        assert_eq!(member.skills, ["Rust"]);
    }
}
