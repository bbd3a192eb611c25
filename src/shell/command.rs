//! Command trait and registry for the shell.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::session::Session;
use crate::tags::prefix_matches;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
    /// Continue without output.
    Continue,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }
}

/// What a positional argument holds. Drives completion and highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    None,
    Keyword,
    /// A 1-based entry number as shown by `list`.
    EntryNumber,
    Tag,
    /// A tag with an optional `+` (add) or `-` (remove) prefix.
    TagChange,
    CommandName,
    Path,
}

/// Everything a command may touch while it runs.
pub struct ShellContext<'a> {
    pub session: &'a mut Session,
    /// Needed by `help`.
    pub registry: Option<&'a CommandRegistry>,
}

impl<'a> ShellContext<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self {
            session,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Primary name of the command.
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line summary for the command list.
    fn description(&self) -> &str;

    /// Usage line, e.g. `add <keyword> [tags...]`.
    fn usage(&self) -> &str;

    /// Detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    /// Runs the command. Argument counts are already checked against
    /// [`Command::min_args`] and [`Command::max_args`].
    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    /// Kind of the argument at `index` (0-based, command name excluded).
    fn arg_kind(&self, _index: usize) -> ArgKind {
        ArgKind::None
    }

    fn min_args(&self) -> usize {
        0
    }

    /// `None` means unlimited.
    fn max_args(&self) -> Option<usize> {
        None
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Checks the argument count of a call before it runs.
pub fn check_arity(cmd: &dyn Command, args: &[&str]) -> Result<(), String> {
    if args.len() < cmd.min_args() {
        return Err(format!("Usage: {}\nMissing required arguments", cmd.usage()));
    }
    if let Some(max) = cmd.max_args() {
        if args.len() > max {
            return Err(format!("Usage: {}\nToo many arguments", cmd.usage()));
        }
    }
    Ok(())
}

/// Parses a 1-based entry number into a store index.
pub fn parse_entry_number(arg: &str) -> Result<usize, String> {
    match arg.trim_start_matches('#').parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!(
            "'{}' is not an entry number. Use the numbers shown by 'list'.",
            arg
        )),
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    /// Commands indexed by their primary name.
    commands: HashMap<String, Arc<dyn Command>>,
    /// Alias to primary name mapping.
    aliases: HashMap<String, String>,
    /// Every name and alias, for completion.
    names: BTreeSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            names: BTreeSet::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.names.insert(name.clone());

        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.names.insert(alias.to_string());
        }

        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        let primary = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.commands.get(primary).map(Arc::clone)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Names and aliases starting with `prefix`, sorted.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        prefix_matches(&self.names, prefix).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
