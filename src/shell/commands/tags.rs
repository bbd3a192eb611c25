//! Tags command implementation.

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext};

/// Command to show the tag index.
pub struct TagsCommand;

impl Command for TagsCommand {
    fn name(&self) -> &str {
        "tags"
    }

    fn aliases(&self) -> &[&str] {
        &["t"]
    }

    fn description(&self) -> &str {
        "List known tags"
    }

    fn usage(&self) -> &str {
        "tags [prefix]"
    }

    fn help(&self) -> &str {
        "List every tag seen this session, sorted.\n\n\
         Tags stay listed after their last entry is deleted unless tagbook\n\
         was started with --prune-tags.\n\n\
         Examples:\n  \
           tags\n  \
           tags st"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let prefix = args.first().copied().unwrap_or_default();
        let tags = ctx.session.store().tags().completions(prefix);

        if tags.is_empty() {
            return CommandResult::success(if prefix.is_empty() {
                "No tags yet.".to_string()
            } else {
                format!("No tags starting with '{}'", prefix)
            });
        }
        CommandResult::success(tags.join("\n"))
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 { ArgKind::Tag } else { ArgKind::None }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
