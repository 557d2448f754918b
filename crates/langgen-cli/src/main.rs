mod config;

use std::{io::Write as _, num::NonZeroUsize};

use camino::Utf8PathBuf;
use clap::Parser as _;
use color_eyre::Result;
use langgen::{Config, Generator, Grammar};
use tracing_subscriber::prelude::*;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::Registry::default()
        .with(tracing_error::ErrorLayer::default())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    run()
}

/// Print the words a string-rewriting grammar generates, one per line
///
/// The first character of the grammar separates the two sides of a rule, the
/// second separates rules. Uppercase letters are nonterminals and the start
/// symbol is the left side of the first rule.
///
/// Example: langgen '=,S=Sa,S=x' 4
#[derive(Debug, clap::Parser)]
#[command(version)]
struct Cli {
    /// The grammar, e.g. "=,S=Sa,S=x"
    grammar: String,
    /// The maximum length of the printed words
    max_length: usize,
    /// Number of worker threads [default: one per hardware thread]
    #[clap(long, short)]
    workers: Option<NonZeroUsize>,
    /// How long an idle worker waits for new work, in milliseconds
    #[clap(long)]
    poll_interval_ms: Option<u64>,
    /// A TOML file with `workers` and `poll_interval_ms`
    ///
    /// Flags given on the command line take precedence.
    #[clap(long)]
    config: Option<Utf8PathBuf>,
    /// Print words in the order they were found instead of sorted by length
    /// and then alphabetically
    #[clap(long)]
    unsorted: bool,
    /// Print the productions to stderr before generating
    #[clap(long)]
    print_grammar: bool,
    /// Only print the number of words
    #[clap(long)]
    count: bool,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::read(path)?,
            None => Config::default(),
        };
        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            config.poll_interval_ms = poll_interval_ms;
        }
        Ok(config)
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;
    tracing::debug!(?config, "configured");

    let grammar = Grammar::parse(&cli.grammar)?;
    if cli.print_grammar {
        eprintln!("{grammar}");
    }

    let language = Generator::new(config).generate(&grammar, cli.max_length);

    let mut stdout = std::io::stdout().lock();
    if cli.count {
        writeln!(stdout, "{}", language.len())?;
        return Ok(());
    }
    let words = if cli.unsorted {
        language.into_words()
    } else {
        language.into_sorted()
    };
    for word in words {
        writeln!(stdout, "{word}")?;
    }
    Ok(())
}
