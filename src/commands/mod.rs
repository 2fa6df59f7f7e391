//! Command registry for REPL commands
//!
//! Each command is a prefix mapped to a handler. Input that matches no
//! prefix is reported as [`CommandResult::NotACommand`] so the REPL can
//! treat it as a bare note list.

pub mod general;
pub mod matching;

use chordmatch_core::{Matcher, Query};
use std::sync::Arc;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try matching the input as notes
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Session state shared by command handlers
pub struct CommandContext {
    pub matcher: Arc<Matcher>,
    /// Key filter, result count and threshold applied to every query
    pub query: Query,
    /// Weight of notes entered without one in `weighted`
    pub default_weight: f64,
    /// Print results as JSON instead of a table
    pub json: bool,
}

impl CommandContext {
    pub fn new(matcher: Arc<Matcher>, query: Query, default_weight: f64) -> Self {
        Self {
            matcher,
            query,
            default_weight,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no prefix matches
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with every built-in command
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("match", matching::cmd_match);
    registry.register("weighted", matching::cmd_weighted);
    registry.register("show", matching::cmd_show);

    registry.register("key", general::cmd_key);
    registry.register("keys", general::cmd_keys);
    registry.register("num", general::cmd_num);
    registry.register("threshold", general::cmd_threshold);
    registry.register("settings", general::cmd_settings);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}
