//! HTTP backend for the team, idea, and roadmap REST API.
//!
//! Every call carries the bearer token resolved by the CLI.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::model::{Idea, Roadmap, Team};

use super::wire::{Envelope, ErrorBody, IdeasData, RoadmapData, TeamData};
use super::{IdeaRequest, IdeaSource, Result, RoadmapSource, SourceError, TeamProvider};

/// Blocking client for the team, idea, and roadmap endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct RoadmapRequest<'a> {
    idea: &'a Idea,
}

impl HttpBackend {
    /// Creates a client for the API rooted at `base_url` (e.g. `http://localhost:5001/api/v1`).
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(format!("huddle/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).bearer_auth(&self.token).send()?;

        handle_response(response)
    }

    fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()?;

        handle_response(response)
    }
}

/// Unwraps the `{ data }` envelope, or turns an error status into [`SourceError::Api`].
fn handle_response<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let envelope: Envelope<T> = response
            .json()
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;
        return Ok(envelope.data);
    }

    let body = response.text().unwrap_or_default();
    Err(SourceError::Api {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

/// Prefers the backend's `message` field, then the raw body, then the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        return message;
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    reason.unwrap_or("unknown error").to_string()
}

impl TeamProvider for HttpBackend {
    fn fetch_team(&self) -> Result<Team> {
        let data: TeamData = self.get("teams/details")?;
        info!(members = data.team.members.len(), "fetched team");
        Ok(data.team)
    }
}

impl IdeaSource for HttpBackend {
    fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<Idea>> {
        let data: IdeasData = self.post("gemini/generate-ideas", request)?;
        let mut rng = rand::rng();
        let ideas: Vec<Idea> = data
            .ideas
            .into_iter()
            .map(|wire| wire.into_idea(&mut rng))
            .collect();
        info!(count = ideas.len(), "generated ideas");
        Ok(ideas)
    }
}

impl RoadmapSource for HttpBackend {
    fn generate_roadmap(&self, idea: &Idea) -> Result<Roadmap> {
        let data: RoadmapData = self.post("gemini/generate-roadmap", &RoadmapRequest { idea })?;
        info!(
            phases = data.roadmap.phases.len(),
            title = %idea.title,
            "generated roadmap"
        );
        Ok(data.roadmap)
    }
}
