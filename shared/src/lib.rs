use serde::{Deserialize, Serialize};

pub mod error;
pub mod service;

pub use error::{Result, TaskError};
pub use service::{add_task, delete_task, toggle_complete, update_task, view_tasks};

pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Builds an incomplete task, trimming both text fields.
    ///
    /// Fails when `id` is zero or the trimmed title is empty.
    pub fn new(id: TaskId, title: &str, description: &str) -> Result<Self> {
        if id == 0 {
            return Err(TaskError::invalid_id(0));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::empty_title());
        }
        Ok(Self {
            id,
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
        })
    }

    pub fn status_marker(&self) -> &'static str {
        if self.completed {
            "[X]"
        } else {
            "[ ]"
        }
    }
}

/// Per-field instruction for an update.
///
/// `SetTo(String::new())` on a description clears it; `Unchanged` leaves the
/// stored value alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    SetTo(T),
}

impl<T> FieldUpdate<T> {
    pub fn as_field_ref(&self) -> FieldUpdate<&T> {
        match self {
            FieldUpdate::Unchanged => FieldUpdate::Unchanged,
            FieldUpdate::SetTo(value) => FieldUpdate::SetTo(value),
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::SetTo(value),
            None => FieldUpdate::Unchanged,
        }
    }
}

/// In-memory task collection owned by the caller.
///
/// Remembers the highest id it has handed out so a deleted id is never
/// issued again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    last_id: TaskId,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    pub(crate) fn next_id(&self) -> TaskId {
        let max_present = self.tasks.iter().map(|task| task.id).max().unwrap_or(0);
        max_present.max(self.last_id) + 1
    }

    pub(crate) fn push(&mut self, task: Task) {
        self.last_id = self.last_id.max(task.id);
        self.tasks.push(task);
    }

    pub(crate) fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        Self { tasks, last_id }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
