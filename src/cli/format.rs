//! Output formatting for CLI display.

use std::fmt::Write;

use crate::model::{Board, DecisionStatus, Idea, Roadmap, Task, Team};

/// First eight characters of an id, enough to pass back as a prefix.
pub(super) fn short_id(id: uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// An idea card: title, metrics, then whichever lists are non-empty.
pub(super) fn format_idea(idea: &Idea) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", idea.title);
    if !idea.description.is_empty() {
        let _ = writeln!(out, "  {}", idea.description);
    }
    let _ = writeln!(
        out,
        "  Challenge: {}  Team match: {}%",
        idea.difficulty, idea.match_score
    );
    if !idea.workflow.is_empty() {
        let _ = writeln!(out, "  Workflow:");
        for (i, step) in idea.workflow.iter().enumerate() {
            let _ = writeln!(out, "    {}. {step}", i + 1);
        }
    }
    if !idea.tech_stack.is_empty() {
        let _ = writeln!(out, "  Tech stack: {}", idea.tech_stack.join(", "));
    }
    if !idea.features.is_empty() {
        let _ = writeln!(out, "  Features:");
        for feature in &idea.features {
            let _ = writeln!(out, "    - {feature}");
        }
    }
    out
}

pub(super) fn format_status(status: DecisionStatus) -> &'static str {
    match status {
        DecisionStatus::Accepted => "accepted",
        DecisionStatus::Skipped => "skipped",
        DecisionStatus::Deferred => "deferred",
    }
}

pub(super) fn format_team(team: &Team) -> String {
    let mut out = String::new();
    if !team.name.is_empty() {
        let _ = writeln!(out, "{}", team.name);
    }
    for member in &team.members {
        if member.skills.is_empty() {
            let _ = writeln!(out, "  {}", member.name);
        } else {
            let _ = writeln!(out, "  {}: {}", member.name, member.skills.join(", "));
        }
    }
    out
}

/// The full plan. Sections with nothing in them are left out.
pub(super) fn format_roadmap(roadmap: &Roadmap) -> String {
    let mut out = String::new();
    for phase in &roadmap.phases {
        if phase.duration.is_empty() {
            let _ = writeln!(out, "{}", phase.name);
        } else {
            let _ = writeln!(out, "{} ({})", phase.name, phase.duration);
        }
        for task in &phase.tasks {
            match task.estimated_hours {
                Some(h) => {
                    let _ = writeln!(out, "  - {} [{h}h]", task.title);
                }
                None => {
                    let _ = writeln!(out, "  - {}", task.title);
                }
            }
            if !task.description.is_empty() {
                let _ = writeln!(out, "    {}", task.description);
            }
            for subtask in &task.subtasks {
                let _ = writeln!(out, "      * {subtask}");
            }
        }
    }
    if let Some(total) = &roadmap.total_duration {
        let _ = writeln!(out, "Total duration: {total}");
    }
    if !roadmap.key_milestones.is_empty() {
        let _ = writeln!(out, "Key milestones:");
        for milestone in &roadmap.key_milestones {
            let _ = writeln!(out, "  - {milestone}");
        }
    }
    if !roadmap.risks_and_mitigations.is_empty() {
        let _ = writeln!(out, "Risks:");
        for item in &roadmap.risks_and_mitigations {
            let _ = writeln!(out, "  - {} -> {}", item.risk, item.mitigation);
        }
    }
    if out.is_empty() {
        out.push_str("(empty roadmap)\n");
    }
    out
}

pub(super) fn format_task(task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{check}] {}  {} ({})",
        short_id(task.id),
        task.title,
        task.priority
    );
    if let Some(h) = task.estimated_hours {
        let _ = write!(line, " {h}h");
    }
    if !task.description.is_empty() {
        let _ = write!(line, "\n      {}", task.description);
    }
    line
}

pub(super) fn format_board(board: &Board) -> String {
    let mut out = format!("{}  {}\n", short_id(board.id), board.idea.title);
    for member in &board.members {
        let done = member.tasks.iter().filter(|t| t.completed).count();
        let _ = writeln!(out, "\n{} [{done}/{}]", member.name, member.tasks.len());
        if member.tasks.is_empty() {
            let _ = writeln!(out, "  (no tasks)");
        }
        for task in &member.tasks {
            let _ = writeln!(out, "  {}", format_task(task));
        }
    }
    out
}
