//! Board command handlers.

use clap::Subcommand;
use tracing::info;

use crate::model::Board;
use crate::source::RoadmapSource;
use crate::storage::Storage;

use super::format::{format_board, format_roadmap, short_id};

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// List all boards, oldest first.
    List,

    /// Show every member's tasks. Requires `--board`.
    Show,

    /// Print the board's roadmap. Requires `--board`.
    Roadmap {
        /// Ask the backend for a new roadmap. Replaces all tasks on the board.
        #[arg(long)]
        regenerate: bool,
    },
}

pub(super) fn cmd_list(storage: &Storage) -> Result<(), String> {
    let boards = storage
        .list_boards()
        .map_err(|e| format!("failed to list boards: {e}"))?;

    if boards.is_empty() {
        println!("No boards.");
        return Ok(());
    }

    for board in &boards {
        let (done, total) = board
            .members
            .iter()
            .flat_map(|m| &m.tasks)
            .fold((0, 0), |(done, total), t| {
                (done + usize::from(t.completed), total + 1)
            });
        println!(
            "{}  [{done}/{total}]  {}  {}",
            short_id(board.id),
            board.idea.title,
            board.created_at.strftime("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub(super) fn cmd_show(board: &Board) {
    print!("{}", format_board(board));
}

pub(super) fn cmd_roadmap(board: &Board) {
    print!("{}", format_roadmap(&board.roadmap));
}

pub(super) fn cmd_regenerate_roadmap(
    storage: &Storage,
    mut board: Board,
    source: &impl RoadmapSource,
) -> Result<(), String> {
    let roadmap = source
        .generate_roadmap(&board.idea)
        .map_err(|e| format!("failed to generate roadmap: {e}"))?;

    board.replace_roadmap(roadmap);
    storage
        .update_board(&board)
        .map_err(|e| format!("failed to save board: {e}"))?;
    info!(board = %board.id, "roadmap regenerated");

    print!("{}", format_roadmap(&board.roadmap));
    eprintln!("warning: task lists were reseeded from the new roadmap");
    Ok(())
}
