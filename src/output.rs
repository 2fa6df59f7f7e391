//! Terminal rendering of match results and catalog entries

use anyhow::Result;
use chordmatch_core::{ChordEntry, Key, MatchResult};
use colored::*;

fn yes_no(flag: bool) -> ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

/// Ranked results as a table. The `first` column only appears for weighted
/// results.
pub fn format_results(results: &[MatchResult]) -> String {
    if results.is_empty() {
        return "No matching chords".yellow().to_string();
    }

    let weighted = results.iter().any(|r| r.root_first.is_some());
    let mut header = format!(
        "{:>3}  {:<12} {:>9}  {:>5} {:>5}  {:<4}",
        "#", "chord", "score", "pcs", "names", "root"
    );
    if weighted {
        header.push_str(&format!(" {:<5}", "first"));
    }
    header.push_str(&format!(" {:>4}  {}", "dist", "size"));

    let mut lines = vec![header.bold().to_string()];
    for (rank, result) in results.iter().enumerate() {
        let mut line = format!(
            "{:>3}  {} {:>9.1}  {:>5} {:>5}  {:<4}",
            rank + 1,
            format!("{:<12}", result.identity).bright_cyan(),
            result.score,
            result.pitch_matches,
            result.name_matches,
            yes_no(result.root_present),
        );
        if let Some(first) = result.root_first {
            line.push_str(&format!(" {:<5}", yes_no(first)));
        }
        line.push_str(&format!(" {:>4}  {}", result.edit_distance, yes_no(result.length_match)));
        lines.push(line);
    }
    lines.join("\n")
}

pub fn results_json(results: &[MatchResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// One catalog entry with its spelling and function
pub fn format_entry(entry: &ChordEntry) -> String {
    let names: Vec<String> = entry.names().iter().map(|n| n.to_string()).collect();
    let pcs: Vec<String> = entry.pitch_classes().iter().map(|pc| pc.to_string()).collect();
    format!(
        "{} {}\n  notes: {}\n  pitch classes: {}\n  {}",
        entry.identity().bright_cyan().bold(),
        format!("({} in {})", entry.symbol(), entry.key()).dimmed(),
        names.join(" ").bright_green(),
        pcs.join(","),
        entry.symbol().function_description(),
    )
}

pub fn format_keys(keys: &[Key]) -> String {
    let (major, minor): (Vec<&Key>, Vec<&Key>) = keys.iter().partition(|k| k.is_major());
    let join = |keys: Vec<&Key>| {
        keys.iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "{} {}\n{} {}",
        "Major:".green(),
        join(major),
        "Minor:".green(),
        join(minor)
    )
}
