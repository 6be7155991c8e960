/// Operation a command name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Delete,
    Update,
    List,
    Toggle,
    Exit,
}

impl CommandKind {
    /// Commands that run without reading an argument string.
    pub fn takes_no_args(self) -> bool {
        matches!(self, CommandKind::List | CommandKind::Exit)
    }
}

/// Recognized names, in the order they are advertised to the user.
pub const COMMANDS: &[(&str, CommandKind)] = &[
    ("add", CommandKind::Add),
    ("delete", CommandKind::Delete),
    ("update", CommandKind::Update),
    ("list", CommandKind::List),
    ("view", CommandKind::List),
    ("complete", CommandKind::Toggle),
    ("mark", CommandKind::Toggle),
    ("exit", CommandKind::Exit),
    ("quit", CommandKind::Exit),
];

pub const USAGE: &[&str] = &[
    "add \"<title>\" \"<description>\"",
    "delete <id>",
    "update <id> \"<title>\" \"<description>\"",
    "complete <id> or mark <id>",
    "list or view",
    "exit or quit",
];

pub fn lookup(name: &str) -> Option<CommandKind> {
    COMMANDS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, kind)| *kind)
}

/// Comma-separated command names, e.g. `add, delete, ...`.
pub fn available() -> String {
    COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
