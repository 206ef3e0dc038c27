//! Team and review command handlers.
//!
//! `review` is the interactive part of the CLI. It reads single-letter
//! answers line by line, so it runs the same against a terminal or a
//! scripted reader. End of input counts as quitting.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use jiff::Timestamp;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::model::{Board, Idea, ReviewDecision, Roadmap, Team};
use crate::source::{IdeaRequest, IdeaSource, RoadmapSource, TeamProvider};
use crate::storage::Storage;
use crate::triage::{Advance, Phase};
use crate::workspace::{Action, Received, Workspace};

use super::format::{format_idea, format_roadmap, format_status, format_team, short_id};

pub(super) fn cmd_team(provider: &impl TeamProvider) -> Result<(), String> {
    let team = provider
        .fetch_team()
        .map_err(|e| format!("failed to fetch team: {e}"))?;

    if team.members.is_empty() {
        println!("No team members.");
        return Ok(());
    }
    print!("{}", format_team(&team));
    Ok(())
}

/// What `--out` receives once the review ends.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewReport<'a> {
    chosen: Option<&'a Idea>,
    decisions: &'a [ReviewDecision],
    board: Option<Uuid>,
    reviewed_at: Timestamp,
}

pub(super) fn cmd_review<B, R, W>(
    backend: &B,
    storage: &Storage,
    prompt: &str,
    out: Option<&Path>,
    input: R,
    output: W,
) -> Result<(), String>
where
    B: TeamProvider + IdeaSource + RoadmapSource,
    R: BufRead,
    W: Write,
{
    let team = backend
        .fetch_team()
        .map_err(|e| format!("failed to fetch team: {e}"))?;
    let request = IdeaRequest::from_team(&team, prompt);

    let mut prompter = Prompter { input, output };
    let mut workspace = Workspace::new();

    triage(backend, &request, &mut workspace, &mut prompter)?;

    let board = match workspace.chosen() {
        Some(idea) => Some(plan_board(backend, storage, idea, &team, &mut prompter)?),
        None => {
            prompter.say("No idea chosen.\n")?;
            None
        }
    };

    let decisions = workspace.decisions();
    if !decisions.is_empty() {
        prompter.say("\nDecisions:\n")?;
        for decision in decisions {
            prompter.say(&format!(
                "  {:<9} {}\n",
                format_status(decision.status),
                decision.idea.title
            ))?;
        }
    }

    if let Some(path) = out {
        let report = ReviewReport {
            chosen: workspace.chosen(),
            decisions,
            board,
            reviewed_at: Timestamp::now(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        prompter.say(&format!("Wrote {}\n", path.display()))?;
    }
    Ok(())
}

/// Line-oriented question and answer over any reader and writer.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn say(&mut self, text: &str) -> Result<(), String> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| format!("failed to write output: {e}"))
    }

    /// Returns the trimmed, lowercased answer, or `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>, String> {
        self.say(question)?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| format!("failed to read input: {e}"))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    fn confirm(&mut self, question: &str) -> Result<bool, String> {
        Ok(matches!(
            self.ask(question)?.as_deref(),
            Some("y" | "yes")
        ))
    }
}

/// Runs the review until an idea is chosen or the user stops.
fn triage<S, R, W>(
    source: &S,
    request: &IdeaRequest,
    workspace: &mut Workspace,
    prompter: &mut Prompter<R, W>,
) -> Result<(), String>
where
    S: IdeaSource + ?Sized,
    R: BufRead,
    W: Write,
{
    if !generate(source, request, workspace, prompter)? {
        return Ok(());
    }

    loop {
        let Some(session) = workspace.session() else {
            return Ok(());
        };
        if session.chosen().is_some() {
            return Ok(());
        }
        if session.is_exhausted() {
            if !prompter.confirm("\nAll ideas reviewed. Generate more? [y/N] ")? {
                return Ok(());
            }
            if !generate(source, request, workspace, prompter)? {
                return Ok(());
            }
            continue;
        }
        let Some(idea) = workspace.current() else {
            return Ok(());
        };

        let (label, keys) = match session.phase() {
            Phase::Primary => ("Idea", "[a]ccept [s]kip [d]efer [q]uit > "),
            Phase::DeferredReview => ("Deferred", "[a]ccept [s]kip [q]uit > "),
        };
        let mut card = format!(
            "\n{label} {}/{}: {}",
            session.cursor() + 1,
            session.active_queue().len(),
            format_idea(idea)
        );
        let deferred = session.deferred().len();
        if deferred > 0 {
            card.push_str(&format!("  ({deferred} deferred for later)\n"));
        }
        prompter.say(&card)?;

        let Some(answer) = prompter.ask(keys)? else {
            return Ok(());
        };
        let action = match answer.as_str() {
            "a" => Action::Accept,
            "s" => Action::Skip,
            "d" => Action::Defer,
            "q" => return Ok(()),
            other => {
                prompter.say(&format!("Unknown key '{other}'.\n"))?;
                continue;
            }
        };

        match workspace.apply(action) {
            Ok(Advance::EnteredDeferredReview) => {
                let count = workspace.session().map_or(0, |s| s.remaining().len());
                prompter.say(&format!(
                    "\nFirst pass done. Revisiting {count} deferred idea(s).\n"
                ))?;
            }
            Ok(Advance::Next | Advance::Exhausted | Advance::Chosen) => {}
            Err(e) => prompter.say(&format!("{e}\n"))?,
        }
    }
}

/// Fetches a batch, offering a retry on failure or an empty batch.
///
/// Returns `false` if the user gave up.
fn generate<S, R, W>(
    source: &S,
    request: &IdeaRequest,
    workspace: &mut Workspace,
    prompter: &mut Prompter<R, W>,
) -> Result<bool, String>
where
    S: IdeaSource + ?Sized,
    R: BufRead,
    W: Write,
{
    loop {
        prompter.say("Generating ideas...\n")?;
        let question = match workspace.generate(source, request) {
            Ok(Received::Started { count }) => {
                prompter.say(&format!("{count} idea(s) to review.\n"))?;
                return Ok(true);
            }
            Ok(Received::Stale) => return Ok(workspace.session().is_some()),
            Ok(Received::Exhausted) => "No ideas came back. Try again? [y/N] ".to_string(),
            Err(e) => format!("{e}\nTry again? [y/N] "),
        };
        if !prompter.confirm(&question)? {
            return Ok(false);
        }
    }
}

/// Fetches the roadmap for the chosen idea and saves a board seeded from it.
fn plan_board<S, R, W>(
    source: &S,
    storage: &Storage,
    idea: &Idea,
    team: &Team,
    prompter: &mut Prompter<R, W>,
) -> Result<Uuid, String>
where
    S: RoadmapSource + ?Sized,
    R: BufRead,
    W: Write,
{
    prompter.say(&format!(
        "\nAccepted: {}\nGenerating roadmap...\n",
        idea.title
    ))?;

    let roadmap = loop {
        match source.generate_roadmap(idea) {
            Ok(roadmap) => break roadmap,
            Err(e) => {
                warn!(error = %e, "roadmap generation failed");
                if !prompter.confirm(&format!("{e}\nTry again? [y/N] "))? {
                    prompter.say("Creating the board without a roadmap.\n")?;
                    break Roadmap::default();
                }
            }
        }
    };

    prompter.say(&format!("\n{}", format_roadmap(&roadmap)))?;

    let board = Board::from_roadmap(idea.clone(), roadmap, team);
    storage
        .create_board(&board)
        .map_err(|e| format!("failed to save board: {e}"))?;

    let short = short_id(board.id);
    prompter.say(&format!(
        "\nBoard {short} created. Next: huddle --board {short} board show\n"
    ))?;
    Ok(board.id)
}
