use anyhow::{Context, Result};
use chordmatch::commands::matching::parse_weighted;
use chordmatch::commands::CommandContext;
use chordmatch::repl::Repl;
use chordmatch::{loader, output, Config, Query};
use chordmatch_core::{Key, MatchResult};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chordmatch")]
#[command(about = "Find the chords a set of notes most likely belongs to")]
struct Cli {
    /// JSON catalog to load instead of the standard one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Prebuilt combination index matching the catalog
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Only show chords from this key, e.g. CMajor or f#Minor
    #[arg(short, long)]
    key: Option<String>,

    /// Maximum number of results
    #[arg(short = 'o', long)]
    num_out: Option<usize>,

    /// Smallest shared combination, 2 to 4
    #[arg(short, long)]
    threshold: Option<usize>,
}

impl QueryArgs {
    fn apply(&self, mut query: Query) -> Result<Query> {
        if let Some(key) = &self.key {
            let key: Key = key.parse().with_context(|| format!("bad --key {:?}", key))?;
            query = query.with_key(key);
        }
        if let Some(num_out) = self.num_out {
            query = query.with_num_out(num_out);
        }
        if let Some(threshold) = self.threshold {
            query = query.with_threshold(threshold);
        }
        Ok(query)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Rank chords for a list of notes
    Match {
        #[arg(required = true, allow_hyphen_values = true)]
        notes: Vec<String>,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Rank chords for notes with salience weights (NOTE=WEIGHT)
    Weighted {
        #[arg(required = true, allow_hyphen_values = true)]
        notes: Vec<String>,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Start the interactive session (the default)
    Repl,
    /// Write the active catalog as JSON
    ExportCatalog { path: PathBuf },
    /// Write the combination index as JSON
    ExportIndex { path: PathBuf },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_results(results: &[MatchResult], json: bool) -> Result<()> {
    if json {
        println!("{}", output::results_json(results)?);
    } else {
        println!("{}", output::format_results(results));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let matcher = loader::load_matcher(&config, cli.catalog.as_deref(), cli.index.as_deref())?;

    match cli.command.unwrap_or(Command::Repl) {
        Command::Match { notes, query } => {
            let query = query.apply(config.query())?;
            let results = matcher.match_notes(&notes, &query)?;
            print_results(&results, cli.json)?;
        }
        Command::Weighted { notes, query } => {
            let query = query.apply(config.query())?;
            let notes = parse_weighted(&notes, config.default_weight())?;
            let results = matcher.match_weighted(&notes, &query)?;
            print_results(&results, cli.json)?;
        }
        Command::Repl => {
            let ctx = CommandContext::new(matcher, config.query(), config.default_weight())
                .with_json(cli.json);
            Repl::new(ctx)?.run()?;
        }
        Command::ExportCatalog { path } => {
            loader::write_catalog(matcher.catalog(), &path)?;
            println!("Wrote {} chords to {}", matcher.catalog().len(), path.display());
        }
        Command::ExportIndex { path } => {
            loader::write_index(matcher.index(), &path)?;
            println!("Wrote {} combinations to {}", matcher.index().len(), path.display());
        }
    }

    Ok(())
}
