use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use feeds::MockSource;
use scrollfeed::config::{ConfigError, FeedConfig, JoinPolicy};
use scrollfeed::view::{render_feed, render_panel, render_split};
use scrollfeed::{ApiCallPanel, Lane, MultiFeed, SingleFeed, SplitFeed, TriggerOutcome};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "scrollfeed", about = "Async infinite-scroll and mock API demos")]
struct Cli {
    /// Print state as JSON instead of view lines.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the simulated API panel once.
    Simulate {
        /// Inject random failures (SIMULATOR_FAILURE_RATE).
        #[arg(long, default_value_t = false)]
        errors: bool,
        #[arg(long, env = "SIMULATOR_RETRIES")]
        retries: Option<usize>,
    },
    /// Scroll a single source.
    Single {
        #[arg(long, value_enum, default_value_t = SourceChoice::Api1)]
        source: SourceChoice,
        #[arg(long, default_value_t = 3)]
        pages: usize,
    },
    /// Scroll two sources merged newest-first.
    Multi {
        #[arg(long, default_value_t = 3)]
        pages: usize,
        /// Isolate per-source failures instead of discarding both pages.
        #[arg(long, default_value_t = false)]
        settled: bool,
    },
    /// Scroll posts and comments side by side.
    Split {
        #[arg(long, default_value_t = 2)]
        pages: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceChoice {
    Api1,
    Api2,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = FeedConfig::from_env()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Simulate { errors, retries } => {
            if let Some(retries) = retries {
                config.simulator_retries = retries;
            }
            run_simulate(&config, errors, cli.json, &mut out).await
        }
        Command::Single { source, pages } => run_single(&config, source, pages, cli.json, &mut out).await,
        Command::Multi { pages, settled } => {
            if settled {
                config.join_policy = JoinPolicy::Settled;
            }
            run_multi(&config, pages, cli.json, &mut out).await
        }
        Command::Split { pages } => run_split(&config, pages, cli.json, &mut out).await,
    }
}

async fn run_simulate(config: &FeedConfig, errors: bool, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let panel = ApiCallPanel::from_config(config, errors);
    if !json {
        write_lines(out, &render_panel(&panel.state()))?;
    }
    let settled = panel.run().await;
    if json {
        return write_json(out, &settled);
    }
    write_lines(out, &render_panel(&settled))
}

async fn run_single(
    config: &FeedConfig,
    choice: SourceChoice,
    pages: usize,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let shape = match choice {
        SourceChoice::Api1 => config.api1_shape(),
        SourceChoice::Api2 => config.api2_shape(),
    };
    let feed = SingleFeed::new(Arc::new(MockSource::new(shape)));

    for _ in 0..pages {
        if feed.trigger().await == TriggerOutcome::Exhausted {
            break;
        }
    }

    let snapshot = feed.snapshot();
    if json {
        return write_json(out, &snapshot);
    }
    write_lines(out, &render_feed("Infinite Scroll", &snapshot))
}

async fn run_multi(config: &FeedConfig, pages: usize, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let feed = MultiFeed::new(
        Arc::new(MockSource::new(config.api1_shape())),
        Arc::new(MockSource::new(config.api2_shape())),
        config.join_policy,
    );

    for _ in 0..pages {
        if feed.trigger().await == TriggerOutcome::Exhausted {
            break;
        }
    }

    let snapshot = feed.snapshot();
    if json {
        return write_json(out, &snapshot);
    }
    write_lines(out, &render_feed("Infinite Scroll with Multiple APIs", &snapshot))
}

async fn run_split(config: &FeedConfig, pages: usize, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let feed = SplitFeed::new(
        Arc::new(MockSource::new(config.posts_shape())),
        Arc::new(MockSource::new(config.comments_shape())),
    );

    feed.mount().await;
    for _ in 1..pages {
        feed.trigger(Lane::Posts).await;
        feed.trigger(Lane::Comments).await;
    }

    let snapshot = feed.snapshot();
    if json {
        return write_json(out, &snapshot);
    }
    write_lines(out, &render_split(&snapshot))
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<(), CliError> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
