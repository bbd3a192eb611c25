//! Import command implementation.

use std::path::Path;

use crate::shell::command::{ArgKind, Command, CommandResult, ShellContext};

/// Command to bulk-load entries from a CSV file.
pub struct ImportCommand;

impl Command for ImportCommand {
    fn name(&self) -> &str {
        "import"
    }

    fn aliases(&self) -> &[&str] {
        &["load"]
    }

    fn description(&self) -> &str {
        "Import entries from a CSV file"
    }

    fn usage(&self) -> &str {
        "import <file>"
    }

    fn help(&self) -> &str {
        "Import entries from a CSV file with a 'Keyword' column and an\n\
         optional 'Tags' column of comma-separated tags.\n\n\
         Rows whose keyword already exists merge their tags into that entry.\n\
         If any row cannot be read, nothing is imported.\n\n\
         Examples:\n  \
           import keywords.csv\n  \
           load ~/Downloads/export.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let path = Path::new(args[0]);

        match ctx.session.store_mut().import_csv_file(path) {
            Ok(summary) => CommandResult::success(format!(
                "Imported {}: {} added, {} updated",
                path.display(),
                summary.added,
                summary.updated
            )),
            Err(e) => {
                log::error!("Import of {} failed: {}", path.display(), e);
                CommandResult::error(format!("Import failed: {}", e))
            }
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        if index == 0 { ArgKind::Path } else { ArgKind::None }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
