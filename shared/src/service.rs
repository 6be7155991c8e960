//! Task operations over a caller-owned [`TaskList`].
//!
//! Each operation validates its input, mutates the list in place and writes a
//! one-line confirmation to `out`.

use std::io::Write;

use tracing::debug;

use crate::{FieldUpdate, Result, Task, TaskError, TaskId, TaskList};

pub fn add_task<W: Write>(
    tasks: &mut TaskList,
    out: &mut W,
    title: &str,
    description: &str,
) -> Result<Task> {
    let id = tasks.next_id();
    let task = Task::new(id, title, description)?;
    tasks.push(task.clone());
    debug!(id, title = %task.title, "task added");

    writeln!(out, "Task added: ID {} - {}", task.id, task.title)?;
    Ok(task)
}

pub fn delete_task<W: Write>(tasks: &mut TaskList, out: &mut W, id: i64) -> Result<Task> {
    let id = checked_id(tasks, id, "delete")?;
    let removed = tasks.remove(id).ok_or_else(|| TaskError::id_not_found(id))?;
    debug!(id, remaining = tasks.len(), "task deleted");

    writeln!(out, "Task deleted: ID {} - {}", id, removed.title)?;
    Ok(removed)
}

pub fn update_task<W: Write>(
    tasks: &mut TaskList,
    out: &mut W,
    id: i64,
    title: FieldUpdate<String>,
    description: FieldUpdate<String>,
) -> Result<Task> {
    let id = checked_id(tasks, id, "update")?;
    if let FieldUpdate::SetTo(title) = title.as_field_ref() {
        if title.trim().is_empty() {
            return Err(TaskError::empty_title());
        }
    }

    let task = tasks.get_mut(id).ok_or_else(|| TaskError::id_not_found(id))?;
    if let FieldUpdate::SetTo(title) = title {
        task.title = title.trim().to_string();
    }
    if let FieldUpdate::SetTo(description) = description {
        task.description = description.trim().to_string();
    }
    debug!(id, title = %task.title, "task updated");

    writeln!(out, "Task updated: ID {} - {}", id, task.title)?;
    Ok(task.clone())
}

/// Flips the completion flag and returns the new value.
pub fn toggle_complete<W: Write>(tasks: &mut TaskList, out: &mut W, id: i64) -> Result<bool> {
    let id = checked_id(tasks, id, "mark")?;
    let task = tasks.get_mut(id).ok_or_else(|| TaskError::id_not_found(id))?;
    task.completed = !task.completed;
    debug!(id, completed = task.completed, "task toggled");

    let state = if task.completed { "complete" } else { "incomplete" };
    writeln!(out, "Task marked as {}: ID {} - {}", state, id, task.title)?;
    Ok(task.completed)
}

pub fn view_tasks<W: Write>(tasks: &TaskList, out: &mut W) -> Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks found.")?;
        return Ok(());
    }

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| task.id);

    for task in sorted {
        writeln!(out, "{} {} - {}", task.status_marker(), task.id, task.title)?;
        if !task.description.is_empty() {
            writeln!(out, "      Description: {}", task.description)?;
        }
    }
    Ok(())
}

// Empty list is reported before the id itself is looked at.
fn checked_id(tasks: &TaskList, id: i64, action: &str) -> Result<TaskId> {
    if tasks.is_empty() {
        return Err(TaskError::empty_list(action));
    }
    TaskId::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| TaskError::invalid_id(id))
}
