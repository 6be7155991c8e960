//! Turns one line of user input into a task operation.
//!
//! The [`Interpreter`] owns the task list and the output sink for a session.
//! Every failure caused by the input line is written out as an `Error:` line
//! and the session carries on; only a broken output sink is returned to the
//! caller.

use std::io::{self, Write};

use thiserror::Error;
use todo_shared::{
    add_task, delete_task, toggle_complete, update_task, view_tasks, FieldUpdate, TaskError,
    TaskList,
};
use tracing::{debug, info, warn};

use crate::commands::{self, CommandKind, USAGE};
use crate::tokenizer::{self, ParseError};

/// What the read loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CommandError {
    fn is_user_error(&self) -> bool {
        match self {
            CommandError::Parse(_) => true,
            CommandError::Task(err) => err.is_user_error(),
            CommandError::Io(_) => false,
        }
    }
}

pub struct Interpreter<W: Write> {
    tasks: TaskList,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_tasks(TaskList::new(), out)
    }

    pub fn with_tasks(tasks: TaskList, out: W) -> Self {
        Self { tasks, out }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (TaskList, W) {
        (self.tasks, self.out)
    }

    /// Handles a single input line.
    ///
    /// Returns `Flow::Exit` only for `exit`/`quit`. An `Err` means the output
    /// sink itself failed.
    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        debug!(input = line, "parsing command");

        let line = line.trim();
        if line.is_empty() {
            writeln!(self.out, "Error: No command provided.")?;
            return Ok(Flow::Continue);
        }

        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let name = name.to_lowercase();
        let kind = commands::lookup(&name);

        match kind {
            Some(CommandKind::Exit) => {
                info!("exit command received");
                return Ok(Flow::Exit);
            }
            Some(CommandKind::List) => {
                info!(command = %name, "executing command");
                let result = view_tasks(&self.tasks, &mut self.out).map_err(CommandError::from);
                self.finish(result)?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let Some(kind) = kind else {
            warn!(command = %name, "unknown command");
            writeln!(
                self.out,
                "Error: Unknown command '{name}'. Available commands: {}",
                commands::available()
            )?;
            return Ok(Flow::Continue);
        };

        if args.is_empty() {
            warn!(command = %name, "command requires arguments");
            writeln!(
                self.out,
                "Error: Invalid command format. Command '{name}' requires arguments."
            )?;
            writeln!(self.out, "Usage examples:")?;
            for usage in USAGE {
                writeln!(self.out, "  {usage}")?;
            }
            return Ok(Flow::Continue);
        }

        info!(command = %name, args, "executing command");
        let result = self.dispatch(kind, args);
        self.finish(result)?;
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, kind: CommandKind, args: &str) -> Result<(), CommandError> {
        debug_assert!(!kind.takes_no_args());
        match kind {
            CommandKind::Add => {
                let tokens = tokenizer::split_args(args)?;
                let Some((title, description)) = title_and_description(&tokens) else {
                    writeln!(self.out, "Error: Add command requires a title.")?;
                    return Ok(());
                };
                add_task(
                    &mut self.tasks,
                    &mut self.out,
                    &title,
                    description.as_deref().unwrap_or(""),
                )?;
            }
            CommandKind::Delete => {
                let id = self.resolve_id(args, "delete")?;
                delete_task(&mut self.tasks, &mut self.out, id)?;
            }
            CommandKind::Toggle => {
                let id = self.resolve_id(args, "mark")?;
                toggle_complete(&mut self.tasks, &mut self.out, id)?;
            }
            CommandKind::Update => {
                let tokens = tokenizer::split_args(args)?;
                let Some((id, rest)) = tokens.split_first() else {
                    writeln!(self.out, "Error: Update command requires at least a task ID.")?;
                    return Ok(());
                };
                let id = self.resolve_id(id, "update")?;
                let (title, description): (FieldUpdate<String>, FieldUpdate<String>) =
                    match title_and_description(rest) {
                        Some((title, description)) => {
                            (FieldUpdate::SetTo(title), description.into())
                        }
                        None => (FieldUpdate::Unchanged, FieldUpdate::Unchanged),
                    };
                update_task(&mut self.tasks, &mut self.out, id, title, description)?;
            }
            CommandKind::List | CommandKind::Exit => {}
        }
        Ok(())
    }

    /// Parses a typed id, reporting ids too large for `i64` the way the task
    /// operations would: empty list first, then invalid or not found.
    fn resolve_id(&self, text: &str, action: &str) -> Result<i64, CommandError> {
        match tokenizer::parse_id(text) {
            Err(ParseError::IdOutOfRange { text, negative }) => {
                let err = if self.tasks.is_empty() {
                    TaskError::empty_list(action)
                } else if negative {
                    TaskError::invalid_id(text)
                } else {
                    TaskError::id_not_found(text)
                };
                Err(err.into())
            }
            parsed => Ok(parsed?),
        }
    }

    fn finish(&mut self, result: Result<(), CommandError>) -> io::Result<()> {
        let Err(err) = result else {
            return Ok(());
        };
        if err.is_user_error() {
            tracing::error!(error = %err, "command failed");
            writeln!(self.out, "Error: {err}")
        } else {
            tracing::error!(error = %err, "unexpected failure while handling command");
            writeln!(self.out, "Unexpected error: {err}")
        }
    }
}

/// Splits argument tokens into a title and an optional description.
///
/// With more than one token the last one is the description and the rest are
/// joined with single spaces to form the title. A multi-word title without a
/// description therefore has to be quoted.
fn title_and_description(tokens: &[String]) -> Option<(String, Option<String>)> {
    match tokens {
        [] => None,
        [title] => Some((title.clone(), None)),
        [head @ .., last] => Some((head.join(" "), Some(last.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> (Interpreter<Vec<u8>>, Vec<Flow>) {
        let mut interpreter = Interpreter::new(Vec::new());
        let flows = lines
            .iter()
            .map(|line| interpreter.execute(line).unwrap())
            .collect();
        (interpreter, flows)
    }

    fn printed(interpreter: &Interpreter<Vec<u8>>) -> String {
        String::from_utf8(interpreter.output().clone()).unwrap()
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn title_and_description_rules() {
        assert_eq!(title_and_description(&[]), None);
        assert_eq!(
            title_and_description(&tokens(&["Only"])),
            Some(("Only".to_string(), None))
        );
        assert_eq!(
            title_and_description(&tokens(&["Meeting", "today"])),
            Some(("Meeting".to_string(), Some("today".to_string())))
        );
        assert_eq!(
            title_and_description(&tokens(&["a", "b", "c"])),
            Some(("a b".to_string(), Some("c".to_string())))
        );
    }

    #[test]
    fn blank_line_is_reported() {
        let (interpreter, flows) = run(&["   "]);
        assert_eq!(flows, vec![Flow::Continue]);
        assert_eq!(printed(&interpreter), "Error: No command provided.\n");
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let (interpreter, flows) = run(&["ADD \"Task A\"", "LiSt", "QUIT"]);
        assert_eq!(flows, vec![Flow::Continue, Flow::Continue, Flow::Exit]);
        assert_eq!(
            printed(&interpreter),
            "Task added: ID 1 - Task A\n[ ] 1 - Task A\n"
        );
    }

    #[test]
    fn exit_ignores_trailing_text() {
        let (_, flows) = run(&["exit now please"]);
        assert_eq!(flows, vec![Flow::Exit]);
    }

    #[test]
    fn unquoted_words_split_into_title_and_description() {
        let (interpreter, _) = run(&["add Meeting today"]);
        let task = interpreter.tasks().get(1).unwrap();
        assert_eq!(task.title, "Meeting");
        assert_eq!(task.description, "today");
    }

    #[test]
    fn add_with_empty_quoted_title_is_a_validation_error() {
        let (interpreter, _) = run(&[r#"add """#]);
        assert!(interpreter.tasks().is_empty());
        assert_eq!(printed(&interpreter), "Error: Task title cannot be empty.\n");
    }

    #[test]
    fn update_with_id_only_changes_nothing() {
        let (interpreter, _) = run(&[r#"add "Title" "desc""#, "update 1"]);
        let task = interpreter.tasks().get(1).unwrap();
        assert_eq!(task.title, "Title");
        assert_eq!(task.description, "desc");
        assert!(printed(&interpreter).ends_with("Task updated: ID 1 - Title\n"));
    }

    #[test]
    fn update_joins_leading_words_into_title() {
        let (interpreter, _) = run(&[r#"add "Title" "desc""#, "update 1 Brand new words"]);
        let task = interpreter.tasks().get(1).unwrap();
        assert_eq!(task.title, "Brand new");
        assert_eq!(task.description, "words");
    }

    #[test]
    fn update_with_bad_id_is_a_parse_error() {
        let (interpreter, _) = run(&[r#"add "Title""#, r#"update one "New""#]);
        assert_eq!(interpreter.tasks().get(1).unwrap().title, "Title");
        assert!(printed(&interpreter)
            .ends_with("Error: Invalid task ID: 'one'. Must be an integer.\n"));
    }

    #[test]
    fn negative_id_is_a_validation_error() {
        let (interpreter, _) = run(&[r#"add "Title""#, "delete -4"]);
        assert_eq!(interpreter.tasks().len(), 1);
        assert!(printed(&interpreter)
            .ends_with("Error: Invalid task ID: -4. Must be positive integer.\n"));
    }

    #[test]
    fn bare_unknown_command_lists_available_ones() {
        let (interpreter, _) = run(&["bogus"]);
        assert_eq!(
            printed(&interpreter),
            "Error: Unknown command 'bogus'. Available commands: \
             add, delete, update, list, view, complete, mark, exit, quit\n"
        );
    }

    #[test]
    fn oversized_ids_follow_task_error_order() {
        let (interpreter, _) = run(&["delete 99999999999999999999"]);
        assert_eq!(
            printed(&interpreter),
            "Error: No tasks available to delete\n"
        );

        let (interpreter, _) = run(&[
            r#"add "Title""#,
            "complete 99999999999999999999",
            "update -99999999999999999999 New",
        ]);
        assert!(printed(&interpreter).ends_with(
            "Error: Task ID not found: 99999999999999999999\n\
             Error: Invalid task ID: -99999999999999999999. Must be positive integer.\n"
        ));
        assert!(!interpreter.tasks().get(1).unwrap().completed);
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_sink_is_returned_to_caller() {
        let mut interpreter = Interpreter::new(BrokenSink);
        assert!(interpreter.execute("list").is_err());
        assert!(interpreter.execute("exit").is_ok());
    }
}
