//! Shell module - rustyline-based interactive shell.
//!
//! This module provides a shell-like interface with:
//! - Command completion
//! - Syntax highlighting
//! - Command history
//! - Command hints

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;

use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::session::Session;

use command::{CommandRegistry, CommandResult, ShellContext, check_arity};
use commands::{farewell, register_all};
use completer::TagbookCompleter;
use highlighter::{OutputHighlighter, TagbookHighlighter};
use hints::TagbookHinter;
use history::HistoryConfig;

const PROMPT: &str = "tagbook> ";

/// Combined helper for rustyline that provides all shell features.
pub struct TagbookHelper {
    completer: TagbookCompleter,
    highlighter: TagbookHighlighter,
    hinter: TagbookHinter,
}

impl TagbookHelper {
    pub fn new(registry: Arc<CommandRegistry>, tag_names: Arc<RwLock<BTreeSet<String>>>) -> Self {
        Self {
            completer: TagbookCompleter::new(Arc::clone(&registry), tag_names),
            highlighter: TagbookHighlighter::new(Arc::clone(&registry)),
            hinter: TagbookHinter::new(registry),
        }
    }
}

impl Completer for TagbookHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for TagbookHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for TagbookHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

/// Keeps reading lines while a quote is left open.
impl Validator for TagbookHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if has_open_quote(ctx.input()) {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

impl Helper for TagbookHelper {}

/// Whether `line` ends inside a single- or double-quoted string.
fn has_open_quote(line: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        match (quote, c) {
            _ if escaped => escaped = false,
            (Some('\''), '\'') => quote = None,
            (Some('\''), _) => {}
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            _ => {}
        }
    }

    quote.is_some()
}

/// Configuration for the shell.
pub struct ShellConfig {
    pub history: HistoryConfig,
    /// Whether to show the welcome message.
    pub show_welcome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_welcome: true,
        }
    }
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    /// Tag names for completion (shared with helper).
    tag_names: Arc<RwLock<BTreeSet<String>>>,
    config: ShellConfig,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            tag_names: Arc::new(RwLock::new(BTreeSet::new())),
            config,
        }
    }

    /// Copies the session's tag index into the completion set.
    fn sync_tag_names(&self, session: &Session) {
        if let Ok(mut names) = self.tag_names.write() {
            names.clone_from(session.store().tags().as_set());
        }
    }

    /// Runs the interactive loop until `quit`, Ctrl-D or a terminal error.
    pub fn run(&self, session: &mut Session) -> Result<()> {
        self.sync_tag_names(session);

        let helper = TagbookHelper::new(Arc::clone(&self.registry), Arc::clone(&self.tag_names));
        let mut editor: Editor<TagbookHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(helper));
        self.config.history.apply(&mut editor)?;

        if self.config.show_welcome {
            println!(
                "Welcome, {}. {} entries loaded. Type 'help' for available commands.",
                session.username(),
                session.store().len()
            );
        }

        log::info!("Shell started for '{}'", session.username());

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Err(e) = editor.add_history_entry(line) {
                        log::debug!("History entry skipped: {}", e);
                    }

                    match self.execute_line(line, session) {
                        CommandResult::Success(Some(msg)) => println!("{}", msg),
                        CommandResult::Success(None) | CommandResult::Continue => {}
                        CommandResult::Error(msg) => {
                            eprintln!("{}", OutputHighlighter::error(&msg));
                        }
                        CommandResult::Exit => {
                            println!("{}", farewell(session));
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    log::debug!("Interrupted (Ctrl-C)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", farewell(session));
                    log::info!("EOF received (Ctrl-D)");
                    break;
                }
                Err(err) => {
                    eprintln!("{}", OutputHighlighter::error(&format!("Error: {}", err)));
                    log::error!("Readline error: {}", err);
                    break;
                }
            }
        }

        if let Err(e) = self.config.history.save(&mut editor) {
            log::warn!("Failed to save history: {}", e);
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes one command line against `session`.
    pub fn execute_line(&self, line: &str, session: &mut Session) -> CommandResult {
        let parts = match shell_words::split(line) {
            Ok(parts) => parts,
            Err(e) => return CommandResult::error(format!("Could not parse input: {}", e)),
        };

        let Some((cmd_name, rest)) = parts.split_first() else {
            return CommandResult::Continue;
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let Some(cmd) = self.registry.get(cmd_name) else {
            return CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                cmd_name
            ));
        };

        if let Err(msg) = check_arity(cmd.as_ref(), &args) {
            log::debug!("Rejected '{}': {}", cmd_name, msg);
            return CommandResult::Error(msg);
        }

        log::debug!("Executing command: {} with args: {:?}", cmd_name, args);

        let start = Instant::now();
        let result = {
            let mut ctx = ShellContext::new(session).with_registry(&self.registry);
            cmd.execute(&args, &mut ctx)
        };
        log::debug!("Command '{}' completed in {:?}", cmd_name, start.elapsed());

        if let CommandResult::Error(msg) = &result {
            log::debug!("Command '{}' reported: {}", cmd_name, msg);
        }

        self.sync_tag_names(session);
        result
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
