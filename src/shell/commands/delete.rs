//! Delete command implementation.

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext, parse_entry_number};

/// Command to delete an entry.
pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn name(&self) -> &str {
        "delete"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "del", "remove"]
    }

    fn description(&self) -> &str {
        "Delete an entry"
    }

    fn usage(&self) -> &str {
        "delete <n>"
    }

    fn help(&self) -> &str {
        "Delete entry <n> (numbers as shown by 'list').\n\n\
         Entries after it move up by one.\n\n\
         Examples:\n  \
           delete 2\n  \
           rm 1"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let index = match parse_entry_number(args[0]) {
            Ok(index) => index,
            Err(msg) => return CommandResult::error(msg),
        };

        match ctx.session.store_mut().delete(index) {
            Ok(Some(removed)) => CommandResult::success(format!("Deleted '{}'", removed.keyword)),
            Ok(None) => CommandResult::error(format!("No entry #{}", index + 1)),
            Err(e) => {
                log::error!("Failed to delete entry #{}: {}", index + 1, e);
                CommandResult::error(e.to_string())
            }
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 {
            ArgKind::EntryNumber
        } else {
            ArgKind::None
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
