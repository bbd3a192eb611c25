//! Help command implementation.

use crate::shell::command::{ArgKind, Command, CommandRegistry, CommandResult, ShellContext};

/// Shown under the command list.
const CONVENTIONS: &str = "\
Entries are addressed by the numbers 'list' prints (1, 2, ... or #1).\n\
Tags may be separated by commas or spaces; in 'update', +tag adds and -tag removes.\n\
Quote keywords that contain spaces: add \"Machine Learning\" ai";

/// Command to display help information.
pub struct HelpCommand;

impl HelpCommand {
    fn overview(registry: &CommandRegistry) -> String {
        let mut commands: Vec<_> = registry.commands().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));

        let width = commands
            .iter()
            .map(|c| c.usage().len())
            .max()
            .unwrap_or_default();

        let mut output = String::from("Commands:\n\n");
        for cmd in commands {
            output.push_str(&format!(
                "  {:<width$}  {}\n",
                cmd.usage(),
                cmd.description(),
                width = width
            ));
        }
        output.push('\n');
        output.push_str(CONVENTIONS);
        output.push_str("\n\nType 'help <command>' for details and aliases.");
        output
    }

    fn detail(cmd: &dyn Command) -> String {
        let mut output = format!("{}\n\nUsage: {}", cmd.name().to_uppercase(), cmd.usage());
        if !cmd.aliases().is_empty() {
            output.push_str(&format!("\nAliases: {}", cmd.aliases().join(", ")));
        }

        let notes = argument_notes(cmd);
        if !notes.is_empty() {
            output.push_str("\n\nArguments:");
            for note in notes {
                output.push_str("\n  ");
                output.push_str(note);
            }
        }

        output.push_str("\n\n");
        output.push_str(cmd.help());
        output
    }
}

/// One line per distinct argument kind the command takes.
fn argument_notes(cmd: &dyn Command) -> Vec<&'static str> {
    let count = cmd.max_args().unwrap_or(cmd.min_args() + 1);
    let mut notes = Vec::new();
    for index in 0..count {
        let note = match cmd.arg_kind(index) {
            ArgKind::Keyword => "keyword  the text to keep; quote it if it has spaces",
            ArgKind::EntryNumber => "n        entry number as shown by 'list'",
            ArgKind::Tag => "tag      a tag name; Tab completes known tags",
            ArgKind::TagChange => "+tag     add a tag (a bare tag also adds), -tag removes it",
            ArgKind::CommandName => "command  a command name or alias",
            ArgKind::Path => "file     path to a CSV file; Tab completes paths",
            ArgKind::None => continue,
        };
        if !notes.contains(&note) {
            notes.push(note);
        }
    }
    notes
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["h", "?"]
    }

    fn description(&self) -> &str {
        "Show commands, or details for one"
    }

    fn usage(&self) -> &str {
        "help [command]"
    }

    fn help(&self) -> &str {
        "Without arguments, lists every command with its usage.\n\
         With a command name or alias, shows its arguments and examples.\n\n\
         Examples:\n  \
           help\n  \
           help update\n  \
           ? rm"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(registry) = ctx.registry else {
            return CommandResult::error("Help not available (no registry)");
        };

        match args.first() {
            None => CommandResult::success(Self::overview(registry)),
            Some(name) => match registry.get(name) {
                Some(cmd) => CommandResult::success(Self::detail(cmd.as_ref())),
                None => CommandResult::error(format!(
                    "Unknown command: '{}'\nType 'help' to see available commands.",
                    name
                )),
            },
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 {
            ArgKind::CommandName
        } else {
            ArgKind::None
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
