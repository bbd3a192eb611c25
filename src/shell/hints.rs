//! Inline hints for the shell.
//!
//! Finishes a unique command name, then shows the arguments still missing
//! from its usage line.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

pub struct TagbookHinter {
    registry: Arc<CommandRegistry>,
}

impl TagbookHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn get_hint(&self, line: &str) -> Option<String> {
        let has_trailing_space = line.ends_with(' ');
        let line = line.trim();

        if line.is_empty() {
            return None;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0];

        if parts.len() == 1 && !has_trailing_space {
            let completions = self.registry.completions(command);
            if completions.len() == 1 {
                let completion = &completions[0];
                if completion.starts_with(command) && completion != command {
                    return Some(completion[command.len()..].to_string());
                }
            }
            return None;
        }

        let cmd = self.registry.get(command)?;
        let arg_count = parts.len() - 1;
        if arg_count >= cmd.min_args() {
            return None;
        }

        let args_part = cmd.usage().strip_prefix(cmd.name())?.trim();
        let hint_parts: Vec<&str> = args_part.split_whitespace().collect();
        if arg_count >= hint_parts.len() {
            return None;
        }

        let lead = if has_trailing_space { "" } else { " " };
        Some(format!("{}{}", lead, hint_parts[arg_count..].join(" ")))
    }
}

impl Hinter for TagbookHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        self.get_hint(line)
    }
}
