//! Idea triage: the accept/skip/defer state machine.
//!
//! A [`TriageSession`] walks a queue of candidate ideas front to back.
//! Each idea is accepted (ending the session), skipped, or deferred.
//! When the primary queue runs out with deferred ideas waiting, they become
//! the active queue for a single second pass in which deferring is no longer
//! allowed. When that runs out too, the session is exhausted and the caller
//! must fetch a fresh batch.
//!
//! Transitions are pure: each takes the session by reference and returns a
//! new one. A rejected transition leaves the original exactly as it was.

use crate::model::{DecisionStatus, Idea, ReviewDecision};

/// Rejected transitions. None of these mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriageError {
    #[error("no ideas to review")]
    EmptyBatch,

    #[error("no idea is under review")]
    NoCurrentIdea,

    #[error("cannot defer while reviewing deferred ideas")]
    DeferDuringReview,

    #[error("an idea has already been chosen")]
    AlreadyChosen,
}

pub type Result<T> = core::result::Result<T, TriageError>;

/// Which queue is being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First pass over a freshly generated batch.
    Primary,

    /// The one-shot second pass over ideas deferred during `Primary`.
    DeferredReview,
}

/// What happened to the queue as a result of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another idea is up for review.
    Next,

    /// The primary queue ran out and the deferred ideas are now active.
    EnteredDeferredReview,

    /// Nothing left to review. A new batch is needed.
    Exhausted,

    /// An idea was accepted. The session is terminal.
    Chosen,
}

/// The result of a successful transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub session: TriageSession,
    pub advance: Advance,
}

/// Review state for one generation of ideas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageSession {
    active_queue: Vec<Idea>,
    cursor: usize,
    deferred_queue: Vec<Idea>,
    decision_log: Vec<ReviewDecision>,
    chosen: Option<Idea>,
    phase: Phase,
}

impl TriageSession {
    /// Starts reviewing a batch. The batch must not be empty.
    pub fn start(ideas: Vec<Idea>) -> Result<Self> {
        Self::with_log(ideas, Vec::new())
    }

    /// Starts a new generation over `ideas`, carrying this session's decision log.
    ///
    /// The new session is back in [`Phase::Primary`]. Ideas still waiting in
    /// the old deferred queue belong to the old generation and are dropped.
    pub fn regenerate(&self, ideas: Vec<Idea>) -> Result<Self> {
        if self.chosen.is_some() {
            return Err(TriageError::AlreadyChosen);
        }
        Self::with_log(ideas, self.decision_log.clone())
    }

    fn with_log(ideas: Vec<Idea>, decision_log: Vec<ReviewDecision>) -> Result<Self> {
        if ideas.is_empty() {
            return Err(TriageError::EmptyBatch);
        }
        Ok(Self {
            active_queue: ideas,
            cursor: 0,
            deferred_queue: Vec::new(),
            decision_log,
            chosen: None,
            phase: Phase::Primary,
        })
    }

    /// The idea under review, or `None` once the active queue is exhausted.
    pub fn current_idea(&self) -> Option<&Idea> {
        self.active_queue.get(self.cursor)
    }

    /// Chooses the current idea. Terminal.
    pub fn accept(&self) -> Result<Transition> {
        let idea = self.reviewable()?.clone();

        let mut next = self.clone();
        next.record(idea.clone(), DecisionStatus::Accepted);
        next.chosen = Some(idea);

        Ok(Transition {
            session: next,
            advance: Advance::Chosen,
        })
    }

    /// Passes on the current idea for good.
    pub fn skip(&self) -> Result<Transition> {
        let idea = self.reviewable()?.clone();

        let mut next = self.clone();
        next.record(idea, DecisionStatus::Skipped);
        next.cursor += 1;
        let advance = next.advance();

        Ok(Transition {
            session: next,
            advance,
        })
    }

    /// Sets the current idea aside for the deferred pass. Only allowed in [`Phase::Primary`].
    pub fn defer(&self) -> Result<Transition> {
        let idea = self.reviewable()?.clone();
        if self.phase == Phase::DeferredReview {
            return Err(TriageError::DeferDuringReview);
        }

        let mut next = self.clone();
        next.deferred_queue.push(idea.clone());
        next.record(idea, DecisionStatus::Deferred);
        next.cursor += 1;
        let advance = next.advance();

        Ok(Transition {
            session: next,
            advance,
        })
    }

    fn reviewable(&self) -> Result<&Idea> {
        if self.chosen.is_some() {
            return Err(TriageError::AlreadyChosen);
        }
        self.current_idea().ok_or(TriageError::NoCurrentIdea)
    }

    fn record(&mut self, idea: Idea, status: DecisionStatus) {
        self.decision_log.push(ReviewDecision { idea, status });
    }

    /// Moves to the deferred pass when the primary queue runs dry.
    fn advance(&mut self) -> Advance {
        if self.cursor < self.active_queue.len() {
            return Advance::Next;
        }
        if self.phase == Phase::Primary && !self.deferred_queue.is_empty() {
            self.active_queue = std::mem::take(&mut self.deferred_queue);
            self.cursor = 0;
            self.phase = Phase::DeferredReview;
            return Advance::EnteredDeferredReview;
        }
        Advance::Exhausted
    }

    /// True when nothing is left to review and nothing was chosen.
    pub fn is_exhausted(&self) -> bool {
        self.chosen.is_none() && self.cursor >= self.active_queue.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_queue(&self) -> &[Idea] {
        &self.active_queue
    }

    /// Ideas in the active queue not yet reviewed, current one first.
    pub fn remaining(&self) -> &[Idea] {
        &self.active_queue[self.cursor.min(self.active_queue.len())..]
    }

    pub fn deferred(&self) -> &[Idea] {
        &self.deferred_queue
    }

    pub fn decisions(&self) -> &[ReviewDecision] {
        &self.decision_log
    }

    pub fn chosen(&self) -> Option<&Idea> {
        self.chosen.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn idea(title: &str) -> Idea {
        Idea {
            title: title.into(),
            description: format!("{title} description"),
            difficulty: "Medium".into(),
            match_score: 80,
            workflow: vec![],
            tech_stack: vec![],
            features: vec![],
        }
    }

    fn titles(ideas: &[Idea]) -> Vec<&str> {
        ideas.iter().map(|i| i.title.as_str()).collect()
    }

    fn log(session: &TriageSession) -> Vec<(&str, DecisionStatus)> {
        session
            .decisions()
            .iter()
            .map(|d| (d.idea.title.as_str(), d.status))
            .collect()
    }

    #[test]
    fn start_sets_up_primary_pass() {
        let session = TriageSession::start(vec![idea("A"), idea("B")]).unwrap();

        assert_eq!(session.phase(), Phase::Primary);
        assert_eq!(session.cursor(), 0);
        assert!(session.deferred().is_empty());
        assert!(session.decisions().is_empty());
        assert!(session.chosen().is_none());
        assert_eq!(session.current_idea().unwrap().title, "A");
    }

    #[test]
    fn start_rejects_empty_batch() {
        let err = TriageSession::start(vec![]).unwrap_err();
        assert_eq!(err, TriageError::EmptyBatch);
    }

    #[test]
    fn defer_skip_accept_scenario() {
        let session = TriageSession::start(vec![idea("A"), idea("B"), idea("C")]).unwrap();

        let t = session.defer().unwrap();
        assert_eq!(t.advance, Advance::Next);
        assert_eq!(titles(t.session.remaining()), ["B", "C"]);
        assert_eq!(titles(t.session.deferred()), ["A"]);

        let t = t.session.skip().unwrap();
        assert_eq!(titles(t.session.remaining()), ["C"]);

        let t = t.session.accept().unwrap();
        assert_eq!(t.advance, Advance::Chosen);
        assert_eq!(t.session.chosen().unwrap().title, "C");
        assert_eq!(
            log(&t.session),
            [
                ("A", DecisionStatus::Deferred),
                ("B", DecisionStatus::Skipped),
                ("C", DecisionStatus::Accepted),
            ]
        );
    }

    #[test]
    fn primary_exhaustion_enters_deferred_review() {
        let session = TriageSession::start(vec![idea("A"), idea("B")]).unwrap();

        let t = session.defer().unwrap();
        let t = t.session.skip().unwrap();

        assert_eq!(t.advance, Advance::EnteredDeferredReview);
        assert_eq!(t.session.phase(), Phase::DeferredReview);
        assert_eq!(titles(t.session.active_queue()), ["A"]);
        assert_eq!(t.session.cursor(), 0);
        assert!(t.session.deferred().is_empty());
        assert_eq!(t.session.current_idea().unwrap().title, "A");
    }

    #[test]
    fn deferring_the_last_idea_also_enters_deferred_review() {
        let session = TriageSession::start(vec![idea("A")]).unwrap();

        let t = session.defer().unwrap();

        assert_eq!(t.advance, Advance::EnteredDeferredReview);
        assert_eq!(titles(t.session.active_queue()), ["A"]);
    }

    #[test]
    fn deferred_ideas_keep_arrival_order() {
        let session =
            TriageSession::start(vec![idea("A"), idea("B"), idea("C"), idea("D")]).unwrap();

        let t = session.defer().unwrap();
        let t = t.session.skip().unwrap();
        let t = t.session.defer().unwrap();
        assert_eq!(titles(t.session.deferred()), ["A", "C"]);

        let t = t.session.defer().unwrap();
        assert_eq!(t.advance, Advance::EnteredDeferredReview);
        assert_eq!(titles(t.session.active_queue()), ["A", "C", "D"]);
    }

    #[test]
    fn skip_only_batch_is_exhausted() {
        let session = TriageSession::start(vec![idea("A")]).unwrap();

        let t = session.skip().unwrap();

        assert_eq!(t.advance, Advance::Exhausted);
        assert_eq!(t.session.phase(), Phase::Primary);
        assert!(t.session.is_exhausted());
        assert!(t.session.chosen().is_none());
        assert!(t.session.current_idea().is_none());
    }

    #[test]
    fn deferred_review_exhaustion_signals_regeneration() {
        let session = TriageSession::start(vec![idea("A")]).unwrap();

        let t = session.defer().unwrap();
        let t = t.session.skip().unwrap();

        assert_eq!(t.advance, Advance::Exhausted);
        assert_eq!(t.session.phase(), Phase::DeferredReview);
        assert!(t.session.is_exhausted());
    }

    #[test]
    fn defer_during_deferred_review_is_rejected_without_mutation() {
        let session = TriageSession::start(vec![idea("A"), idea("B")]).unwrap();
        let t = session.defer().unwrap();
        let reviewing = t.session.skip().unwrap().session;
        let before = reviewing.clone();

        let err = reviewing.defer().unwrap_err();

        assert_eq!(err, TriageError::DeferDuringReview);
        assert_eq!(reviewing, before);
    }

    #[test]
    fn transitions_after_chosen_are_rejected() {
        let session = TriageSession::start(vec![idea("A"), idea("B")]).unwrap();
        let chosen = session.accept().unwrap().session;
        let before = chosen.clone();

        assert_eq!(chosen.accept().unwrap_err(), TriageError::AlreadyChosen);
        assert_eq!(chosen.skip().unwrap_err(), TriageError::AlreadyChosen);
        assert_eq!(chosen.defer().unwrap_err(), TriageError::AlreadyChosen);
        assert_eq!(
            chosen.regenerate(vec![idea("C")]).unwrap_err(),
            TriageError::AlreadyChosen
        );
        assert_eq!(chosen, before);
    }

    #[test]
    fn transitions_on_exhausted_session_are_rejected() {
        let exhausted = TriageSession::start(vec![idea("A")])
            .unwrap()
            .skip()
            .unwrap()
            .session;

        assert_eq!(exhausted.accept().unwrap_err(), TriageError::NoCurrentIdea);
        assert_eq!(exhausted.skip().unwrap_err(), TriageError::NoCurrentIdea);
        assert_eq!(exhausted.defer().unwrap_err(), TriageError::NoCurrentIdea);
    }

    #[test]
    fn log_grows_by_one_per_successful_transition() {
        let mut session =
            TriageSession::start(vec![idea("A"), idea("B"), idea("C"), idea("D")]).unwrap();
        let mut issued = 0;

        for step in ["defer", "skip", "defer", "defer", "skip", "defer", "skip"] {
            let result = match step {
                "defer" => session.defer(),
                _ => session.skip(),
            };
            let before = session.decisions().len();
            if let Ok(t) = result {
                issued += 1;
                assert_eq!(t.session.decisions().len(), before + 1);
                session = t.session;
            }
            assert_eq!(session.decisions().len(), issued);
        }

        // Primary: A deferred, B skipped, C deferred, D deferred.
        // Deferred pass: A skipped, deferring C rejected, C skipped.
        assert_eq!(issued, 6);
        assert_eq!(session.current_idea().unwrap().title, "D");
    }

    #[test]
    fn every_idea_is_visited_at_most_twice() {
        let ideas = vec![idea("A"), idea("B"), idea("C")];
        let mut session = TriageSession::start(ideas).unwrap();

        loop {
            let t = match session.defer() {
                Ok(t) => t,
                Err(TriageError::DeferDuringReview) => session.skip().unwrap(),
                Err(e) => panic!("unexpected: {e}"),
            };
            session = t.session;
            if t.advance == Advance::Exhausted {
                break;
            }
        }

        for title in ["A", "B", "C"] {
            let visits = session
                .decisions()
                .iter()
                .filter(|d| d.idea.title == title)
                .count();
            assert_eq!(visits, 2, "{title}");
        }
    }

    #[test]
    fn current_idea_is_idempotent() {
        let session = TriageSession::start(vec![idea("A"), idea("B")]).unwrap();
        let before = session.clone();

        for _ in 0..3 {
            assert_eq!(session.current_idea().unwrap().title, "A");
        }
        assert_eq!(session, before);
    }

    #[test]
    fn regenerate_keeps_the_decision_log() {
        let exhausted = TriageSession::start(vec![idea("A")])
            .unwrap()
            .skip()
            .unwrap()
            .session;

        let fresh = exhausted.regenerate(vec![idea("B"), idea("C")]).unwrap();

        assert_eq!(fresh.phase(), Phase::Primary);
        assert_eq!(fresh.cursor(), 0);
        assert_eq!(fresh.current_idea().unwrap().title, "B");
        assert_eq!(log(&fresh), [("A", DecisionStatus::Skipped)]);
    }

    #[test]
    fn regenerate_after_deferred_review_allows_deferring_again() {
        let reviewed = TriageSession::start(vec![idea("A")])
            .unwrap()
            .defer()
            .unwrap()
            .session
            .skip()
            .unwrap()
            .session;

        let fresh = reviewed.regenerate(vec![idea("B")]).unwrap();
        let t = fresh.defer().unwrap();

        assert_eq!(t.advance, Advance::EnteredDeferredReview);
        assert_eq!(t.session.decisions().len(), 3);
    }

    #[test]
    fn regenerate_rejects_empty_batch() {
        let session = TriageSession::start(vec![idea("A")]).unwrap();
        assert_eq!(
            session.regenerate(vec![]).unwrap_err(),
            TriageError::EmptyBatch
        );
    }
}
