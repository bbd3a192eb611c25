//! Quit command implementation.

use crate::session::Session;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Line printed when the shell closes, by `quit` or end of input.
pub fn farewell(session: &Session) -> String {
    let count = session.store().len();
    format!(
        "Goodbye, {}. {} {} saved.",
        session.username(),
        count,
        if count == 1 { "entry" } else { "entries" }
    )
}

/// Command to exit the shell.
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "q"]
    }

    fn description(&self) -> &str {
        "Leave the shell (changes are already on disk)"
    }

    fn usage(&self) -> &str {
        "quit"
    }

    fn help(&self) -> &str {
        "Leave the shell. Every add, update, delete and import is written\n\
         when it runs, so nothing is lost by quitting or pressing Ctrl-D.\n\n\
         Examples:\n  \
           quit\n  \
           q"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        log::info!(
            "'{}' quit with {} entries and {} known tags",
            ctx.session.username(),
            ctx.session.store().len(),
            ctx.session.store().tags().len()
        );
        CommandResult::Exit
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
