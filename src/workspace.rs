//! Workspace: a triage session plus the generation requests that feed it.
//!
//! Idea generation is the only slow step. While a request is outstanding the
//! session is frozen, and when several requests overlap only the newest
//! response is applied. Each request gets a [`Ticket`]. Only the newest
//! outstanding ticket is accepted, and only once; anything else is dropped.
//!
//! The decision log survives regeneration: a new batch starts a new primary
//! pass on top of the existing log.

use tracing::{debug, info, warn};

use crate::model::{Idea, ReviewDecision};
use crate::source::{IdeaRequest, IdeaSource, SourceError};
use crate::triage::{Advance, TriageError, TriageSession};

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("idea generation is still in progress")]
    GenerationPending,

    #[error("no ideas have been generated yet")]
    NoSession,

    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error("failed to generate ideas: {0}")]
    Source(#[from] SourceError),
}

pub type Result<T> = core::result::Result<T, WorkspaceError>;

/// Identifies one generation request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What happened to a generation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// A new primary pass began over `count` ideas.
    Started { count: usize },

    /// The source had nothing to offer. The session is unchanged.
    Exhausted,

    /// A newer request was issued after this one, or this ticket was already
    /// received. Ignored.
    Stale,
}

/// A reviewer's verdict on the current idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    Skip,
    Defer,
}

#[derive(Debug, Default)]
pub struct Workspace {
    session: Option<TriageSession>,
    issued: u64,
    pending: Option<Ticket>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new generation request and freezes the session until it resolves.
    pub fn begin_generation(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.pending = Some(ticket);
        debug!(ticket = ticket.0, "generation requested");
        ticket
    }

    /// Applies the response for `ticket`.
    ///
    /// A failed request unfreezes the session, leaves it unchanged, and
    /// returns [`WorkspaceError::Source`]. Retrying is up to the user.
    pub fn receive(
        &mut self,
        ticket: Ticket,
        result: core::result::Result<Vec<Idea>, SourceError>,
    ) -> Result<Received> {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "dropping stale generation response"
            );
            return Ok(Received::Stale);
        }
        self.pending = None;

        let ideas = result.inspect_err(|e| warn!(error = %e, "idea generation failed"))?;
        if ideas.is_empty() {
            info!("idea source returned an empty batch");
            return Ok(Received::Exhausted);
        }

        let count = ideas.len();
        let session = match &self.session {
            Some(current) if current.chosen().is_none() => current.regenerate(ideas)?,
            _ => TriageSession::start(ideas)?,
        };
        self.session = Some(session);
        info!(count, "review started");
        Ok(Received::Started { count })
    }

    /// Requests a batch from `source` and applies it.
    pub fn generate<S: IdeaSource + ?Sized>(
        &mut self,
        source: &S,
        request: &IdeaRequest,
    ) -> Result<Received> {
        let ticket = self.begin_generation();
        let result = source.generate_ideas(request);
        self.receive(ticket, result)
    }

    /// Applies a verdict to the current idea.
    pub fn apply(&mut self, action: Action) -> Result<Advance> {
        if self.pending.is_some() {
            return Err(WorkspaceError::GenerationPending);
        }
        let session = self.session.as_ref().ok_or(WorkspaceError::NoSession)?;

        let transition = match action {
            Action::Accept => session.accept(),
            Action::Skip => session.skip(),
            Action::Defer => session.defer(),
        }?;

        debug!(?action, advance = ?transition.advance, "applied");
        self.session = Some(transition.session);
        Ok(transition.advance)
    }

    pub fn session(&self) -> Option<&TriageSession> {
        self.session.as_ref()
    }

    pub fn current(&self) -> Option<&Idea> {
        self.session.as_ref()?.current_idea()
    }

    pub fn chosen(&self) -> Option<&Idea> {
        self.session.as_ref()?.chosen()
    }

    pub fn decisions(&self) -> &[ReviewDecision] {
        match &self.session {
            Some(session) => session.decisions(),
            None => &[],
        }
    }
}
