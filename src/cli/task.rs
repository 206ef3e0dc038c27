//! Task command handlers.

use clap::{Subcommand, ValueEnum};

use crate::model::{Board, Priority};
use crate::storage::Storage;
use crate::tracker::{NewTask, TaskEdit};

use super::format::{format_task, short_id};

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task to a member's list.
    Add {
        /// Member name, as shown by `board show`.
        #[arg(long)]
        member: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,

        /// Estimated effort in hours.
        #[arg(long)]
        hours: Option<f32>,
    },

    /// Change fields of an existing task. Omitted fields stay as they are.
    Edit {
        #[arg(long)]
        member: String,

        /// Task ID: full UUID or unambiguous prefix.
        #[arg(long)]
        task: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,

        #[arg(long, conflicts_with = "clear_hours")]
        hours: Option<f32>,

        /// Remove the estimate.
        #[arg(long)]
        clear_hours: bool,
    },

    /// Delete a task.
    Remove {
        #[arg(long)]
        member: String,

        /// Task ID: full UUID or unambiguous prefix.
        #[arg(long)]
        task: String,
    },

    /// Mark a task done, or not done if it already was.
    Toggle {
        #[arg(long)]
        member: String,

        /// Task ID: full UUID or unambiguous prefix.
        #[arg(long)]
        task: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl PriorityArg {
    fn to_domain(self) -> Priority {
        match self {
            Self::High => Priority::High,
            Self::Medium => Priority::Medium,
            Self::Low => Priority::Low,
        }
    }
}

/// Applies `command` to `board` and saves it.
pub(super) fn run(storage: &Storage, mut board: Board, command: TaskCommand) -> Result<(), String> {
    let message = apply(&mut board, command)?;
    storage
        .update_board(&board)
        .map_err(|e| format!("failed to save board: {e}"))?;
    println!("{message}");
    Ok(())
}

/// Returns the line to print on success.
fn apply(board: &mut Board, command: TaskCommand) -> Result<String, String> {
    match command {
        TaskCommand::Add {
            member,
            title,
            description,
            priority,
            hours,
        } => {
            let new = NewTask {
                title,
                description,
                priority: priority.to_domain(),
                estimated_hours: hours,
            };
            let id = board.add_task(&member, new).map_err(|e| e.to_string())?;
            Ok(format!("Added {} for {member}", short_id(id)))
        }
        TaskCommand::Edit {
            member,
            task,
            title,
            description,
            priority,
            hours,
            clear_hours,
        } => {
            let id = board
                .resolve_task(&member, &task)
                .map_err(|e| e.to_string())?;
            let edit = TaskEdit {
                title,
                description,
                priority: priority.map(PriorityArg::to_domain),
                estimated_hours: if clear_hours { Some(None) } else { hours.map(Some) },
            };
            let task = board
                .edit_task(&member, id, edit)
                .map_err(|e| e.to_string())?;
            Ok(format_task(task))
        }
        TaskCommand::Remove { member, task } => {
            let id = board
                .resolve_task(&member, &task)
                .map_err(|e| e.to_string())?;
            let removed = board
                .remove_task(&member, id)
                .map_err(|e| e.to_string())?;
            Ok(format!("Removed {}: {}", short_id(removed.id), removed.title))
        }
        TaskCommand::Toggle { member, task } => {
            let id = board
                .resolve_task(&member, &task)
                .map_err(|e| e.to_string())?;
            let completed = board
                .toggle_complete(&member, id)
                .map_err(|e| e.to_string())?;
            let state = if completed { "done" } else { "not done" };
            Ok(format!("{} is {state}", short_id(id)))
        }
    }
}
