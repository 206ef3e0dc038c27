//! Task tracker: per-member task lists on a [`Board`].
//!
//! Each member's list is independent. Tasks are addressed by member name and
//! task id, where the id may be given as an unambiguous prefix.

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{Board, Idea, MemberTasks, Priority, Roadmap, Task, Team};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("no member named '{0}' on this board")]
    UnknownMember(String),

    #[error("no task matching '{0}'")]
    TaskNotFound(String),

    #[error("'{reference}' is ambiguous: matches {count} tasks")]
    AmbiguousTask { reference: String, count: usize },

    #[error("task title cannot be empty")]
    EmptyTitle,
}

pub type Result<T> = core::result::Result<T, TrackerError>;

/// Fields for a new task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_hours: Option<f32>,
}

/// Field replacements for an existing task. `None` leaves a field as it was.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the estimate.
    pub estimated_hours: Option<Option<f32>>,
}

impl Board {
    /// Seeds a board for `idea` from its roadmap.
    ///
    /// Members are the team roster in order, followed by any extra names the
    /// roadmap assigned tasks to.
    pub fn from_roadmap(idea: Idea, roadmap: Roadmap, team: &Team) -> Self {
        let now = Timestamp::now();
        let names = team.members.iter().map(|m| m.name.clone()).collect();

        Self {
            id: Uuid::new_v4(),
            idea,
            members: seed_members(names, &roadmap, now),
            roadmap,
            created_at: now,
        }
    }

    /// Swaps in a regenerated roadmap and reseeds every member's list from it.
    ///
    /// Tasks added or edited since the last seeding are replaced.
    pub fn replace_roadmap(&mut self, roadmap: Roadmap) {
        let names = self.members.iter().map(|m| m.name.clone()).collect();
        self.members = seed_members(names, &roadmap, Timestamp::now());
        self.roadmap = roadmap;
    }

    pub fn member(&self, name: &str) -> Result<&MemberTasks> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| TrackerError::UnknownMember(name.to_string()))
    }

    fn member_mut(&mut self, name: &str) -> Result<&mut MemberTasks> {
        self.members
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| TrackerError::UnknownMember(name.to_string()))
    }

    /// Appends a task to a member's list and returns its id.
    pub fn add_task(&mut self, member: &str, new: NewTask) -> Result<Uuid> {
        if new.title.trim().is_empty() {
            return Err(TrackerError::EmptyTitle);
        }
        let list = self.member_mut(member)?;
        let id = Uuid::new_v4();
        list.tasks.push(Task {
            id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            estimated_hours: new.estimated_hours,
            completed: false,
            created_at: Timestamp::now(),
        });
        Ok(id)
    }

    /// Replaces the given fields of a task.
    pub fn edit_task(&mut self, member: &str, id: Uuid, edit: TaskEdit) -> Result<&Task> {
        if edit.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TrackerError::EmptyTitle);
        }
        let task = self.task_mut(member, id)?;
        if let Some(title) = edit.title {
            task.title = title;
        }
        if let Some(description) = edit.description {
            task.description = description;
        }
        if let Some(priority) = edit.priority {
            task.priority = priority;
        }
        if let Some(hours) = edit.estimated_hours {
            task.estimated_hours = hours;
        }
        Ok(&*task)
    }

    /// Removes a task, returning it.
    pub fn remove_task(&mut self, member: &str, id: Uuid) -> Result<Task> {
        let list = self.member_mut(member)?;
        let index = list
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrackerError::TaskNotFound(id.to_string()))?;
        Ok(list.tasks.remove(index))
    }

    /// Flips a task's completion and returns the new state.
    pub fn toggle_complete(&mut self, member: &str, id: Uuid) -> Result<bool> {
        let task = self.task_mut(member, id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Resolves a full task id or unambiguous prefix within a member's list.
    pub fn resolve_task(&self, member: &str, reference: &str) -> Result<Uuid> {
        let list = self.member(member)?;

        if let Ok(id) = reference.parse::<Uuid>() {
            return list
                .tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.id)
                .ok_or_else(|| TrackerError::TaskNotFound(reference.to_string()));
        }

        let matches: Vec<Uuid> = list
            .tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(reference))
            .map(|t| t.id)
            .collect();

        match matches.as_slice() {
            [] => Err(TrackerError::TaskNotFound(reference.to_string())),
            [id] => Ok(*id),
            _ => Err(TrackerError::AmbiguousTask {
                reference: reference.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn task_mut(&mut self, member: &str, id: Uuid) -> Result<&mut Task> {
        self.member_mut(member)?
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TrackerError::TaskNotFound(id.to_string()))
    }
}

/// Builds member lists from the roadmap's to-do lists.
///
/// Seeded tasks start incomplete; blank titles are dropped and unknown
/// priority labels become `Medium`.
fn seed_members(mut names: Vec<String>, roadmap: &Roadmap, now: Timestamp) -> Vec<MemberTasks> {
    for name in roadmap.member_tasks.keys() {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }

    names
        .into_iter()
        .map(|name| {
            let tasks: Vec<Task> = roadmap
                .member_tasks
                .get(&name)
                .map(|plan| {
                    plan.todo_list
                        .iter()
                        .filter(|t| !t.task.trim().is_empty())
                        .map(|t| Task {
                            id: Uuid::new_v4(),
                            title: t.task.clone(),
                            description: t.description.clone(),
                            priority: t
                                .priority
                                .as_deref()
                                .and_then(|p| p.parse().ok())
                                .unwrap_or_default(),
                            estimated_hours: t.estimated_hours,
                            completed: false,
                            created_at: now,
                        })
                        .collect()
                })
                .unwrap_or_default();
            MemberTasks { name, tasks }
        })
        .collect()
}
