//! Session commands (help, quit, key, num, threshold, keys, settings)

use crate::commands::{CommandContext, CommandResult};
use crate::output::format_keys;
use chordmatch_core::config::clamp_threshold;
use chordmatch_core::Key;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `key [KEY|off]`
pub fn cmd_key(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(match &ctx.query.key {
            Some(key) => format!("Key filter: {}", key),
            None => "No key filter".to_string(),
        });
    }

    if matches!(args, "off" | "none" | "all") {
        ctx.query.key = None;
        return CommandResult::Message("Key filter cleared".bright_green().to_string());
    }

    match args.parse::<Key>() {
        Ok(key) => {
            ctx.query.key = Some(key);
            CommandResult::Message(format!("Key filter set to {}", key).bright_green().to_string())
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `keys`: list the keys in the catalog
pub fn cmd_keys(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(format_keys(&ctx.matcher.catalog().keys()))
}

/// Handle `num [N]`
pub fn cmd_num(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Showing up to {} results", ctx.query.num_out));
    }

    match args.parse::<usize>() {
        Ok(n) => {
            ctx.query.num_out = n;
            CommandResult::Message(format!("Showing up to {} results", n).bright_green().to_string())
        }
        Err(_) => CommandResult::Error("Usage: num <count>".to_string()),
    }
}

/// Handle `threshold [2-4]`
pub fn cmd_threshold(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Threshold: {}", ctx.query.threshold));
    }

    match args.parse::<usize>() {
        Ok(t) => {
            let clamped = clamp_threshold(t);
            if clamped != t {
                log::debug!("threshold {} clamped to {}", t, clamped);
            }
            ctx.query.threshold = clamped;
            CommandResult::Message(format!("Threshold set to {}", clamped).bright_green().to_string())
        }
        Err(_) => CommandResult::Error("Usage: threshold <2-4>".to_string()),
    }
}

/// Handle `settings`
pub fn cmd_settings(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let key = ctx
        .query
        .key
        .map_or_else(|| "any".to_string(), |k| k.to_string());
    CommandResult::Message(format!(
        "key: {}  num: {}  threshold: {}  default weight: {}",
        key.cyan(),
        ctx.query.num_out,
        ctx.query.threshold,
        ctx.default_weight
    ))
}

fn print_help() {
    println!("{}", "Chordmatch Help".bold());
    println!("{}", "===============".bold());
    println!();
    println!("{}", "Matching:".green());
    println!("  {}            - Rank chords for the notes", "C E G".cyan());
    println!("  {}      - Same, as a command", "match C E G".cyan());
    println!(
        "  {} - Weighted match; bare notes get the default weight",
        "weighted C=0.4 E=0.3 G".cyan()
    );
    println!("  {}     - Spelling and function of a chord", "show CMajorV".cyan());
    println!();
    println!("{}", "Settings:".green());
    println!("  {}    - Only show chords from a key ({} to clear)", "key aMinor".cyan(), "key off".cyan());
    println!("  {}          - Maximum number of results", "num 5".cyan());
    println!("  {}    - Smallest shared combination, 2 to 4", "threshold 3".cyan());
    println!("  {}         - Current settings", "settings".cyan());
    println!("  {}             - Keys in the catalog", "keys".cyan());
    println!();
    println!("Notes are a letter with repeated #, b, - or x modifiers, for example {}.", "Bb F# Cx".cyan());
    println!("Type '{}' or '{}' to leave.", "quit".bright_red(), "exit".bright_red());
}
