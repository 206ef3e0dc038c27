//! CLI interface for Huddle.
//!
//! Commands split into three groups:
//!
//! - `huddle team` and `huddle review`: talk to the backend, no board needed.
//! - `huddle board list|show|roadmap`: boards created by accepted ideas.
//! - `huddle --board <id> task ...`: edit one member's tasks on a board.
//!
//! The `--board` flag takes a full UUID or unambiguous prefix.

mod board;
mod format;
mod review;
mod task;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::config::Config;
use crate::credential::resolve_token;
use crate::model::Board;
use crate::source::HttpBackend;
use crate::storage::Storage;

use board::BoardCommand;
use format::short_id;
use task::TaskCommand;

/// Huddle: pick a hackathon project with your team, then split the work.
#[derive(Debug, Parser)]
#[command(name = "huddle", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Board ID: full UUID or unambiguous prefix (e.g. `a3b`).
    /// Required for `board show`, `board roadmap`, and `task`.
    #[arg(long, global = true)]
    board: Option<String>,

    /// Bearer token for the backend. Overrides `HUDDLE_TOKEN` and the config file.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: from brief to tasks
  1. huddle team
  2. huddle review --prompt "48h climate hackathon, web + mobile" --out review.json
     a = accept, s = skip, d = defer (first pass only), q = quit
     → accepting prints a board ID (e.g. a3b0fc12)
  3. huddle --board a3b board show
  4. huddle --board a3b task add --member Ada --title "Wire login" --priority high
  5. huddle --board a3b task toggle --member Ada --task 5f1"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the team roster used for idea generation.
    Team,

    /// Generate project ideas for the team and review them one by one.
    ///
    /// Ideas you defer come back for one more look after the first pass.
    /// When nothing is left you can ask for a fresh batch.
    /// Accepting an idea fetches its roadmap and creates a task board.
    Review {
        /// Event details and project requirements.
        #[arg(long)]
        prompt: String,

        /// Write the chosen idea and every decision to this file as JSON.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Inspect boards created from accepted ideas.
    Board {
        #[command(subcommand)]
        command: BoardCommand,
    },

    /// Edit tasks on a board. Requires `--board`.
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config, storage: &Storage) -> Result<(), String> {
    match cli.command {
        Command::Team => {
            let backend = connect(config, cli.token.as_deref())?;
            review::cmd_team(&backend)
        }
        Command::Review { prompt, out } => {
            let backend = connect(config, cli.token.as_deref())?;
            review::cmd_review(
                &backend,
                storage,
                &prompt,
                out.as_deref(),
                io::stdin().lock(),
                io::stdout().lock(),
            )
        }
        Command::Board { command } => match command {
            BoardCommand::List => board::cmd_list(storage),
            BoardCommand::Show => {
                let board = require_board(storage, cli.board.as_deref())?;
                board::cmd_show(&board);
                Ok(())
            }
            BoardCommand::Roadmap { regenerate } => {
                let board = require_board(storage, cli.board.as_deref())?;
                if regenerate {
                    let backend = connect(config, cli.token.as_deref())?;
                    board::cmd_regenerate_roadmap(storage, board, &backend)
                } else {
                    board::cmd_roadmap(&board);
                    Ok(())
                }
            }
        },
        Command::Task { command } => {
            let board = require_board(storage, cli.board.as_deref())?;
            task::run(storage, board, command)
        }
    }
}

/// Build the HTTP backend with the resolved bearer token.
fn connect(config: &Config, token: Option<&str>) -> Result<HttpBackend, String> {
    let token = resolve_token(token, config)?;
    HttpBackend::new(&config.api_base_url, token, config.timeout())
        .map_err(|e| format!("failed to create HTTP client: {e}"))
}

/// Require that `--board` was provided and resolve it.
fn require_board(storage: &Storage, board_ref: Option<&str>) -> Result<Board, String> {
    let board_ref = board_ref.ok_or("this command requires --board <id>")?;
    resolve_board(storage, board_ref)
}

/// Resolve a board reference (full UUID or unambiguous prefix) to a board.
fn resolve_board(storage: &Storage, reference: &str) -> Result<Board, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_board(id)
            .map_err(|e| format!("board not found: {e}"));
    }

    // Try as a prefix match against all boards.
    let boards = storage
        .list_boards()
        .map_err(|e| format!("failed to list boards: {e}"))?;

    let mut matches: Vec<Board> = boards
        .into_iter()
        .filter(|b| b.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no board matching '{reference}'")),
        1 => Ok(matches.remove(0)),
        n => {
            let ids: Vec<String> = matches.iter().map(|b| short_id(b.id)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} boards: {}",
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::{Roadmap, Team};
    use crate::triage::tests::idea;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("boards")).unwrap();
        (dir, storage)
    }

    fn saved_board(storage: &Storage) -> Board {
        let board = Board::from_roadmap(idea("X"), Roadmap::default(), &Team::default());
        storage.create_board(&board).unwrap();
        board
    }

    #[test]
    fn resolves_full_id_and_prefix() {
        let (_dir, storage) = test_storage();
        let board = saved_board(&storage);

        let by_id = resolve_board(&storage, &board.id.to_string()).unwrap();
        let by_prefix = resolve_board(&storage, &short_id(board.id)).unwrap();

        assert_eq!(by_id.id, board.id);
        assert_eq!(by_prefix.id, board.id);
    }

    #[test]
    fn unknown_prefix_fails() {
        let (_dir, storage) = test_storage();
        saved_board(&storage);

        let err = resolve_board(&storage, "zzz").unwrap_err();
        assert!(err.contains("no board matching"));
    }

    #[test]
    fn empty_prefix_with_several_boards_is_ambiguous() {
        let (_dir, storage) = test_storage();
        saved_board(&storage);
        saved_board(&storage);

        let err = resolve_board(&storage, "").unwrap_err();
        assert!(err.contains("ambiguous"));
    }

    #[test]
    fn board_flag_is_required() {
        let (_dir, storage) = test_storage();
        let err = require_board(&storage, None).unwrap_err();

        assert_eq!(err, "this command requires --board <id>");
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "huddle", "task", "toggle", "--member", "Ada", "--task", "5f1", "--board", "a3b",
        ])
        .unwrap();

        assert_eq!(cli.board.as_deref(), Some("a3b"));
        assert!(matches!(cli.command, Command::Task { .. }));
    }
}
