mod config;
mod output;
mod replay;

use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tickmark_core::{EndOfStream, Tokenizer};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::{Config, Format, Overrides};
use output::Renderer;
use replay::{deliver, Chunker};

const SAMPLE: &str = include_str!("../../samples/blogpost.md");

#[derive(Parser)]
#[command(name = "tickmark")]
#[command(about = "Stream markdown through the tickmark tokenizer in random chunks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log tokenizer activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a file (or stdin) delivered in random chunks
    Render {
        /// Input file; `-` or absent reads stdin
        path: Option<PathBuf>,

        #[command(flatten)]
        replay: ReplayArgs,
    },
    /// Replay the built-in sample post
    Demo {
        #[command(flatten)]
        replay: ReplayArgs,
    },
}

#[derive(Args)]
struct ReplayArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Smallest chunk, in characters
    #[arg(long)]
    min_chunk: Option<usize>,

    /// Largest chunk, in characters
    #[arg(long)]
    max_chunk: Option<usize>,

    /// Seed for chunk sizes
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between chunks, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// What to do with unresolved input at the end: flush or discard
    #[arg(long)]
    end_of_stream: Option<EndOfStream>,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ReplayArgs {
    fn resolve(self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let config = base.merge(Overrides {
            format: self.format,
            min_chunk: self.min_chunk,
            max_chunk: self.max_chunk,
            seed: self.seed,
            delay_ms: self.delay_ms,
            end_of_stream: self.end_of_stream,
        })?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Render { path, replay } => {
            let input = read_input(path.as_ref())?;
            run(&input, replay.resolve()?)
        }
        Commands::Demo { replay } => run(SAMPLE, replay.resolve()?),
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn run(input: &str, config: Config) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    debug!(seed, ?config, "replaying {} bytes", input.len());

    let chunks = Chunker::new(seed, config.min_chunk, config.max_chunk).split(input);
    let mut tokenizer = Tokenizer::with_options(config.tokenizer_options());
    let mut renderer = Renderer::new(config.format, io::stdout().lock());

    deliver(
        &mut tokenizer,
        &chunks,
        Duration::from_millis(config.delay_ms),
        &mut renderer,
        |renderer| renderer.flush(),
    );

    renderer.finish().context("failed to write output")?;
    Ok(())
}
