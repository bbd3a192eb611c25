//! Export command implementation.

use std::path::Path;

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext};

/// Command to write entries out as CSV.
pub struct ExportCommand;

impl Command for ExportCommand {
    fn name(&self) -> &str {
        "export"
    }

    fn aliases(&self) -> &[&str] {
        &["save"]
    }

    fn description(&self) -> &str {
        "Export entries as CSV to a file or the screen"
    }

    fn usage(&self) -> &str {
        "export [file]"
    }

    fn help(&self) -> &str {
        "Write all entries as CSV with 'Keyword' and 'Tags' columns.\n\n\
         Without a file the CSV is printed.\n\n\
         Examples:\n  \
           export\n  \
           export keywords.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let store = ctx.session.store();
        if store.is_empty() {
            return CommandResult::success("Nothing to export.");
        }

        let Some(target) = args.first() else {
            return match store.to_csv_string() {
                Ok(csv) => CommandResult::success(csv.trim_end().to_string()),
                Err(e) => CommandResult::error(format!("Export failed: {}", e)),
            };
        };

        let path = Path::new(target);
        match store.export_csv_file(path) {
            Ok(()) => CommandResult::success(format!(
                "Exported {} entries to {}",
                store.len(),
                path.display()
            )),
            Err(e) => {
                log::error!("Export to {} failed: {}", path.display(), e);
                CommandResult::error(format!("Export failed: {}", e))
            }
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 { ArgKind::Path } else { ArgKind::None }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::scratch_session;
    use std::fs;

    #[test]
    fn test_export_command_to_screen() {
        let (mut session, _dir) = scratch_session();
        session
            .store_mut()
            .add("ML", vec!["ai".into(), "nlp".into()])
            .unwrap();
        let mut ctx = ShellContext::new(&mut session);

        match ExportCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert_eq!(msg, "Keyword,Tags\nML,\"ai, nlp\""),
            other => panic!("Expected CSV, got {:?}", other),
        }
    }

    #[test]
    fn test_export_command_to_file() {
        let (mut session, dir) = scratch_session();
        session.store_mut().add("Go", vec!["lang".into()]).unwrap();
        let out = dir.path().join("out.csv");
        let mut ctx = ShellContext::new(&mut session);

        let result = ExportCommand.execute(&[out.to_str().unwrap()], &mut ctx);

        assert!(matches!(result, CommandResult::Success(_)));
        assert_eq!(fs::read_to_string(&out).unwrap(), "Keyword,Tags\nGo,lang\n");
    }

    #[test]
    fn test_export_command_empty_store() {
        let (mut session, dir) = scratch_session();
        let out = dir.path().join("out.csv");
        let mut ctx = ShellContext::new(&mut session);

        match ExportCommand.execute(&[out.to_str().unwrap()], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert_eq!(msg, "Nothing to export."),
            other => panic!("Expected notice, got {:?}", other),
        }
        assert!(!out.exists());
    }
}
