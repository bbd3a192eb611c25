//! Tab completion for rustyline.
//!
//! Completes command names, then each argument according to the
//! command's [`ArgKind`].

use rustyline::Context;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::shell::command::{ArgKind, CommandRegistry};
use crate::tags::prefix_matches;

/// Completer that handles both command and argument completion.
pub struct TagbookCompleter {
    registry: Arc<CommandRegistry>,
    /// Tag names of the open session, refreshed after every command.
    tag_names: Arc<RwLock<BTreeSet<String>>>,
    files: FilenameCompleter,
}

impl TagbookCompleter {
    pub fn new(registry: Arc<CommandRegistry>, tag_names: Arc<RwLock<BTreeSet<String>>>) -> Self {
        Self {
            registry,
            tag_names,
            files: FilenameCompleter::new(),
        }
    }

    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        to_pairs(self.registry.completions(partial))
    }

    fn complete_tag(&self, partial: &str) -> Vec<Pair> {
        match self.tag_names.read() {
            Ok(tags) => to_pairs(prefix_matches(&tags, partial).cloned().collect()),
            Err(_) => vec![],
        }
    }

    /// Like [`Self::complete_tag`] but keeps a leading `+` or `-`.
    fn complete_tag_change(&self, partial: &str) -> Vec<Pair> {
        let (sign, name) = match partial.chars().next() {
            Some(c @ ('+' | '-')) => (c.to_string(), &partial[1..]),
            _ => (String::new(), partial),
        };

        self.complete_tag(name)
            .into_iter()
            .map(|pair| Pair {
                display: pair.display,
                replacement: format!("{}{}", sign, pair.replacement),
            })
            .collect()
    }

    fn parse_context<'a>(&self, line: &'a str, pos: usize) -> CompletionContext<'a> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();

        if parts.is_empty() {
            return CompletionContext::Command { partial: "" };
        }

        let ends_with_space = line_to_pos.ends_with(char::is_whitespace);

        if parts.len() == 1 && !ends_with_space {
            return CompletionContext::Command { partial: parts[0] };
        }

        let (arg_index, partial) = if ends_with_space {
            (parts.len() - 1, "")
        } else {
            (parts.len() - 2, parts[parts.len() - 1])
        };

        CompletionContext::Argument {
            command: parts[0],
            arg_index,
            partial,
        }
    }
}

fn to_pairs(names: Vec<String>) -> Vec<Pair> {
    names
        .into_iter()
        .map(|s| Pair {
            display: s.clone(),
            replacement: s,
        })
        .collect()
}

enum CompletionContext<'a> {
    Command {
        partial: &'a str,
    },
    Argument {
        command: &'a str,
        arg_index: usize,
        partial: &'a str,
    },
}

impl Completer for TagbookCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match self.parse_context(line, pos) {
            CompletionContext::Command { partial } => {
                Ok((pos - partial.len(), self.complete_command(partial)))
            }
            CompletionContext::Argument {
                command,
                arg_index,
                partial,
            } => {
                let kind = self
                    .registry
                    .get(command)
                    .map(|cmd| cmd.arg_kind(arg_index))
                    .unwrap_or(ArgKind::None);

                let completions = match kind {
                    ArgKind::Path => return self.files.complete_path(line, pos),
                    ArgKind::Tag => self.complete_tag(partial),
                    ArgKind::TagChange => self.complete_tag_change(partial),
                    ArgKind::CommandName => self.complete_command(partial),
                    // New keywords and entry numbers have nothing to offer.
                    ArgKind::Keyword | ArgKind::EntryNumber | ArgKind::None => vec![],
                };

                Ok((pos - partial.len(), completions))
            }
        }
    }
}
