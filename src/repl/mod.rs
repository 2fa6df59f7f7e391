//! Interactive chord matching session

use crate::commands::{create_registry, matching, CommandContext, CommandRegistry, CommandResult};
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Line-oriented REPL over a [`CommandRegistry`]
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    pub fn new(ctx: CommandContext) -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            registry: create_registry(),
            ctx,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", "Chordmatch".bright_cyan().bold());
        println!(
            "Enter notes like {} or {}",
            "C E G".cyan(),
            "weighted C=0.4 E=0.3 G=0.3".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "chordmatch>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    if !report(execute_line(&self.registry, line, &mut self.ctx)) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!("{} {:?}", "Error:".bright_red().bold(), err);
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Run one line: a registered command, or otherwise a list of notes
pub fn execute_line(registry: &CommandRegistry, line: &str, ctx: &mut CommandContext) -> CommandResult {
    match registry.execute(line, ctx) {
        CommandResult::NotACommand => matching::cmd_match(line, ctx),
        result => result,
    }
}

/// Print a command's outcome. Returns false when the session should end.
fn report(result: CommandResult) -> bool {
    match result {
        CommandResult::Success | CommandResult::NotACommand => {}
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Error(e) => println!("{} {}", "Error:".bright_red().bold(), e.red()),
        CommandResult::Exit => {
            println!("{}", "Goodbye!".bright_cyan());
            return false;
        }
    }
    true
}
