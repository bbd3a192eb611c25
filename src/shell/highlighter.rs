//! Input highlighting and output formatting for the shell.

use rustyline::highlight::{CmdKind, Highlighter};
use std::borrow::Cow;
use std::sync::Arc;

use crate::entry::Entry;
use crate::shell::command::{ArgKind, CommandRegistry};

/// ANSI color codes.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";

    /// Rotation used for tag chips.
    pub const TAG_PALETTE: [&str; 5] = [CYAN, BLUE, MAGENTA, RED, YELLOW];
}

/// Colors the command line as it is typed.
pub struct TagbookHighlighter {
    registry: Arc<CommandRegistry>,
}

impl TagbookHighlighter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn highlight_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let Some(command) = trimmed.split_whitespace().next() else {
            return line.to_string();
        };

        let leading = &line[..line.len() - trimmed.len()];
        let rest = &trimmed[command.len()..];
        let cmd = self.registry.get(command);

        let mut result = String::from(leading);
        match &cmd {
            Some(_) => {
                result.push_str(colors::BOLD);
                result.push_str(colors::CYAN);
            }
            None => result.push_str(colors::RED),
        }
        result.push_str(command);
        result.push_str(colors::RESET);

        let mut pos = 0;
        for (i, part) in rest.split_whitespace().enumerate() {
            let start = rest[pos..].find(part).unwrap_or(0) + pos;
            result.push_str(&rest[pos..start]);

            let kind = cmd.as_ref().map(|c| c.arg_kind(i)).unwrap_or(ArgKind::None);
            result.push_str(arg_color(kind, part));
            result.push_str(part);
            result.push_str(colors::RESET);

            pos = start + part.len();
        }
        result.push_str(&rest[pos..]);

        result
    }
}

fn arg_color(kind: ArgKind, text: &str) -> &'static str {
    match kind {
        ArgKind::Keyword => colors::MAGENTA,
        ArgKind::EntryNumber => colors::CYAN,
        ArgKind::Tag => colors::YELLOW,
        ArgKind::TagChange if text.starts_with('-') => colors::RED,
        ArgKind::TagChange => colors::GREEN,
        ArgKind::CommandName => colors::YELLOW,
        ArgKind::Path => colors::DIM,
        ArgKind::None => colors::WHITE,
    }
}

impl Highlighter for TagbookHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(format!(
            "{}{}{}{}",
            colors::BOLD,
            colors::BRIGHT_GREEN,
            prompt,
            colors::RESET
        ))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", colors::DIM, hint, colors::RESET))
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        _completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        Cow::Owned(format!(
            "{}{}{}",
            colors::BRIGHT_CYAN,
            candidate,
            colors::RESET
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Formatting for command output.
pub struct OutputHighlighter;

impl OutputHighlighter {
    pub fn success(msg: &str) -> String {
        format!("{}{}{}", colors::GREEN, msg, colors::RESET)
    }

    pub fn error(msg: &str) -> String {
        format!("{}{}{}", colors::BRIGHT_RED, msg, colors::RESET)
    }

    pub fn warning(msg: &str) -> String {
        format!("{}{}{}", colors::YELLOW, msg, colors::RESET)
    }

    pub fn keyword(keyword: &str) -> String {
        format!("{}{}{}{}", colors::BOLD, colors::MAGENTA, keyword, colors::RESET)
    }

    /// `#tag` chips, colored in rotation.
    pub fn tag_chips(tags: &[String]) -> String {
        tags.iter()
            .enumerate()
            .map(|(i, tag)| {
                let color = colors::TAG_PALETTE[i % colors::TAG_PALETTE.len()];
                format!("{}#{}{}", color, tag, colors::RESET)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One numbered line of the entry table.
    pub fn entry_line(number: usize, entry: &Entry) -> String {
        let tags = if entry.tags.is_empty() {
            format!("{}(no tags){}", colors::DIM, colors::RESET)
        } else {
            Self::tag_chips(&entry.tags)
        };
        format!("{:>4}. {}  {}", number, Self::keyword(&entry.keyword), tags)
    }
}
