//! Add command implementation.

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext};
use crate::tags::parse_tags;

/// Command to add a new entry.
pub struct AddCommand;

impl Command for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn aliases(&self) -> &[&str] {
        &["a", "new"]
    }

    fn description(&self) -> &str {
        "Add a keyword with optional tags"
    }

    fn usage(&self) -> &str {
        "add <keyword> [tags...]"
    }

    fn help(&self) -> &str {
        "Add a new keyword entry. Repeated tags are stored once.\n\n\
         Examples:\n  \
           add Rust lang systems\n  \
           add \"Machine Learning\" ai,study,\"deep learning\""
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let keyword = args[0];
        let tags = parse_tags(&args[1..].join(","));

        match ctx.session.store_mut().add(keyword, tags) {
            Ok(entry) => CommandResult::success(format!(
                "Added '{}' with {} tags",
                entry.keyword,
                entry.tags.len()
            )),
            Err(e) if e.is_validation() => {
                log::debug!("Rejected add of '{}': {}", keyword, e);
                CommandResult::error(e.to_string())
            }
            Err(e) => {
                log::error!("Failed to add '{}': {}", keyword, e);
                CommandResult::error(e.to_string())
            }
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 {
            ArgKind::Keyword
        } else {
            ArgKind::Tag
        }
    }

    fn min_args(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::scratch_session;

    #[test]
    fn test_add_command_success() {
        let (mut session, _dir) = scratch_session();
        let mut ctx = ShellContext::new(&mut session);

        let result = AddCommand.execute(&["Machine Learning", "ai,study", "ai"], &mut ctx);

        match result {
            CommandResult::Success(Some(msg)) => assert_eq!(msg, "Added 'Machine Learning' with 2 tags"),
            other => panic!("Expected success, got {:?}", other),
        }
        let entry = session.store().get(0).unwrap();
        assert_eq!(entry.keyword, "Machine Learning");
        assert_eq!(entry.tags, vec!["ai", "study"]);
    }

    #[test]
    fn test_add_command_blank_keyword() {
        let (mut session, _dir) = scratch_session();
        let mut ctx = ShellContext::new(&mut session);

        let result = AddCommand.execute(&["  ", "tag"], &mut ctx);

        assert!(matches!(result, CommandResult::Error(_)));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_add_command_without_tags() {
        let (mut session, _dir) = scratch_session();
        let mut ctx = ShellContext::new(&mut session);

        let result = AddCommand.execute(&["Go"], &mut ctx);

        assert!(matches!(result, CommandResult::Success(_)));
        assert!(session.store().get(0).unwrap().tags.is_empty());
    }
}
