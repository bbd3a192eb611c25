//! Update command implementation.

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext, parse_entry_number};
use crate::tags::{parse_tags, push_unique};

/// Command to add and remove tags on an existing entry.
pub struct UpdateCommand;

/// Splits `+tag` / `tag` (add) from `-tag` (remove) arguments.
fn split_changes(args: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut to_add = Vec::new();
    let mut to_remove = Vec::new();

    for &arg in args {
        match arg.strip_prefix('-') {
            Some(rest) => push_unique(&mut to_remove, parse_tags(rest)),
            None => push_unique(&mut to_add, parse_tags(arg.strip_prefix('+').unwrap_or(arg))),
        };
    }

    (to_add, to_remove)
}

impl Command for UpdateCommand {
    fn name(&self) -> &str {
        "update"
    }

    fn aliases(&self) -> &[&str] {
        &["edit", "tag"]
    }

    fn description(&self) -> &str {
        "Add or remove tags on an entry"
    }

    fn usage(&self) -> &str {
        "update <n> <+tag|-tag>..."
    }

    fn help(&self) -> &str {
        "Change the tags of entry <n> (numbers as shown by 'list').\n\n\
         Tags prefixed with '-' are removed; all others are added. Additions\n\
         are applied first, so '+x -x' leaves the entry without 'x'.\n\n\
         Examples:\n  \
           update 1 nlp -ai\n  \
           update 3 +urgent,study -done"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let index = match parse_entry_number(args[0]) {
            Ok(index) => index,
            Err(msg) => return CommandResult::error(msg),
        };
        let (to_add, to_remove) = split_changes(&args[1..]);

        let store = ctx.session.store_mut();
        match store.update(index, &to_add, &to_remove) {
            Ok(true) => match store.get(index) {
                Some(entry) => CommandResult::success(format!(
                    "Updated '{}': {}",
                    entry.keyword,
                    if entry.tags.is_empty() {
                        "no tags".to_string()
                    } else {
                        entry.joined_tags()
                    }
                )),
                None => CommandResult::ok(),
            },
            Ok(false) => CommandResult::error(format!("No entry #{}", index + 1)),
            Err(e) => {
                log::error!("Failed to update entry #{}: {}", index + 1, e);
                CommandResult::error(e.to_string())
            }
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 {
            ArgKind::EntryNumber
        } else {
            ArgKind::TagChange
        }
    }

    fn min_args(&self) -> usize {
        2
    }
}
