use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Failures raised by task operations.
///
/// The `Display` form is the bare message; callers add their own prefix.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    pub fn empty_title() -> Self {
        Self::Validation("Task title cannot be empty.".to_string())
    }

    pub fn invalid_id(id: impl std::fmt::Display) -> Self {
        Self::Validation(format!("Invalid task ID: {id}. Must be positive integer."))
    }

    pub fn id_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Task ID not found: {id}"))
    }

    pub fn empty_list(action: &str) -> Self {
        Self::NotFound(format!("No tasks available to {action}"))
    }

    /// Whether the interpreter may report this and keep reading input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render_without_prefix() {
        assert_eq!(
            TaskError::invalid_id(-3).to_string(),
            "Invalid task ID: -3. Must be positive integer."
        );
        assert_eq!(TaskError::id_not_found(9).to_string(), "Task ID not found: 9");
        assert_eq!(
            TaskError::empty_list("delete").to_string(),
            "No tasks available to delete"
        );
    }

    #[test]
    fn io_errors_are_not_user_errors() {
        let err = TaskError::from(std::io::Error::other("sink closed"));
        assert!(!err.is_user_error());
        assert!(TaskError::empty_title().is_user_error());
    }
}
