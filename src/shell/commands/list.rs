//! List command implementation.

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;

/// Command to show the numbered entry table.
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn aliases(&self) -> &[&str] {
        &["ls", "l"]
    }

    fn description(&self) -> &str {
        "List entries, optionally only those with a tag"
    }

    fn usage(&self) -> &str {
        "list [tag]"
    }

    fn help(&self) -> &str {
        "Display every entry with its number and tags.\n\n\
         The numbers are the ones 'update' and 'delete' expect. With a tag,\n\
         only entries carrying it are shown (numbers stay the same).\n\n\
         Examples:\n  \
           list\n  \
           ls study"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let store = ctx.session.store();
        if store.is_empty() {
            return CommandResult::success("No entries yet. Use 'add' to create one.");
        }

        let filter = args.first().copied();
        let lines: Vec<String> = store
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.is_none_or(|tag| entry.has_tag(tag)))
            .map(|(i, entry)| OutputHighlighter::entry_line(i + 1, entry))
            .collect();

        if lines.is_empty() {
            return CommandResult::success(format!(
                "No entries tagged '{}'",
                filter.unwrap_or_default()
            ));
        }

        log::debug!("Listed {} of {} entries", lines.len(), store.len());
        CommandResult::success(lines.join("\n"))
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 { ArgKind::Tag } else { ArgKind::None }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::scratch_session;

    #[test]
    fn test_list_command_empty() {
        let (mut session, _dir) = scratch_session();
        let mut ctx = ShellContext::new(&mut session);

        match ListCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("No entries")),
            other => panic!("Expected success message, got {:?}", other),
        }
    }

    #[test]
    fn test_list_command_keeps_insertion_order() {
        let (mut session, _dir) = scratch_session();
        session.store_mut().add("Rust", vec!["lang".into()]).unwrap();
        session.store_mut().add("Go", vec![]).unwrap();
        session.store_mut().add("ML", vec!["ai".into()]).unwrap();
        let mut ctx = ShellContext::new(&mut session);

        match ListCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => {
                let lines: Vec<&str> = msg.lines().collect();
                assert_eq!(lines.len(), 3);
                assert!(lines[0].contains("1.") && lines[0].contains("Rust"));
                assert!(lines[1].contains("2.") && lines[1].contains("Go"));
                assert!(lines[2].contains("3.") && lines[2].contains("#ai"));
            }
            other => panic!("Expected success with list, got {:?}", other),
        }
    }

    #[test]
    fn test_list_command_tag_filter() {
        let (mut session, _dir) = scratch_session();
        session.store_mut().add("Rust", vec!["lang".into()]).unwrap();
        session.store_mut().add("ML", vec!["ai".into()]).unwrap();
        let mut ctx = ShellContext::new(&mut session);

        match ListCommand.execute(&["ai"], &mut ctx) {
            CommandResult::Success(Some(msg)) => {
                assert_eq!(msg.lines().count(), 1);
                assert!(msg.contains("2."));
                assert!(msg.contains("ML"));
            }
            other => panic!("Expected filtered list, got {:?}", other),
        }

        match ListCommand.execute(&["none"], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert_eq!(msg, "No entries tagged 'none'"),
            other => panic!("Expected empty filter message, got {:?}", other),
        }
    }
}
