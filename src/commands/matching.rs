//! Matching commands (match, weighted, show)

use crate::commands::{CommandContext, CommandResult};
use crate::output::{format_entry, format_results, results_json};
use anyhow::{anyhow, Context, Result};
use chordmatch_core::MatchResult;

/// Split note input on whitespace and commas
pub fn note_tokens(args: &str) -> Vec<&str> {
    args.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse `NOTE=WEIGHT` tokens. A bare note gets `default_weight`.
pub fn parse_weighted<S: AsRef<str>>(tokens: &[S], default_weight: f64) -> Result<Vec<(String, f64)>> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            match token.split_once('=') {
                Some((note, weight)) => {
                    let weight: f64 = weight
                        .trim()
                        .parse()
                        .with_context(|| format!("invalid weight in {:?}", token))?;
                    Ok((note.trim().to_string(), weight))
                }
                None => Ok((token.to_string(), default_weight)),
            }
        })
        .collect()
}

fn render(results: &[MatchResult], ctx: &CommandContext) -> CommandResult {
    if ctx.json {
        match results_json(results) {
            Ok(json) => CommandResult::Message(json),
            Err(e) => CommandResult::Error(e.to_string()),
        }
    } else {
        CommandResult::Message(format_results(results))
    }
}

/// Handle `match <notes>`; also used for bare note input
pub fn cmd_match(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let notes = note_tokens(args);
    if notes.is_empty() {
        return CommandResult::Error("Usage: match <note> <note> ...".to_string());
    }

    match ctx.matcher.match_notes(&notes, &ctx.query) {
        Ok(results) => render(&results, ctx),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `weighted <note[=weight]> ...`
pub fn cmd_weighted(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let tokens = note_tokens(args);
    if tokens.is_empty() {
        return CommandResult::Error("Usage: weighted <note>=<weight> ...".to_string());
    }

    let result = parse_weighted(&tokens, ctx.default_weight).and_then(|notes| {
        ctx.matcher
            .match_weighted(&notes, &ctx.query)
            .map_err(|e| anyhow!(e))
    });
    match result {
        Ok(results) => render(&results, ctx),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `show <identity>`
pub fn cmd_show(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: show <chord>".to_string());
    }

    match ctx.matcher.catalog().get(args) {
        Some(entry) => CommandResult::Message(format_entry(entry)),
        None => CommandResult::Error(format!("No chord named {}", args)),
    }
}
