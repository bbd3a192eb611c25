//! Random command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;

/// Command to pick an entry at random.
pub struct RandomCommand;

impl Command for RandomCommand {
    fn name(&self) -> &str {
        "random"
    }

    fn aliases(&self) -> &[&str] {
        &["r", "pick"]
    }

    fn description(&self) -> &str {
        "Show a random entry"
    }

    fn usage(&self) -> &str {
        "random"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(entry) = ctx.session.store().pick_random() else {
            return CommandResult::success(OutputHighlighter::warning("Database is empty."));
        };

        log::debug!("Picked '{}'", entry.keyword);
        let tags = if entry.tags.is_empty() {
            "No tags assigned".to_string()
        } else {
            OutputHighlighter::tag_chips(&entry.tags)
        };
        CommandResult::success(format!(
            "{}\n{}",
            OutputHighlighter::keyword(&entry.keyword),
            tags
        ))
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::scratch_session;

    #[test]
    fn test_random_command_empty_store() {
        let (mut session, _dir) = scratch_session();
        let mut ctx = ShellContext::new(&mut session);

        match RandomCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("Database is empty")),
            other => panic!("Expected empty notice, got {:?}", other),
        }
    }

    #[test]
    fn test_random_command_single_entry() {
        let (mut session, _dir) = scratch_session();
        session
            .store_mut()
            .add("ML", vec!["ai".into(), "nlp".into()])
            .unwrap();
        let mut ctx = ShellContext::new(&mut session);

        match RandomCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => {
                assert!(msg.contains("ML"));
                assert!(msg.contains("#ai"));
                assert!(msg.contains("#nlp"));
            }
            other => panic!("Expected picked entry, got {:?}", other),
        }
    }

    #[test]
    fn test_random_command_untagged() {
        let (mut session, _dir) = scratch_session();
        session.store_mut().add("Go", vec![]).unwrap();
        let mut ctx = ShellContext::new(&mut session);

        match RandomCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("No tags assigned")),
            other => panic!("Expected picked entry, got {:?}", other),
        }
    }
}
