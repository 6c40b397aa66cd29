//! Bubblebar - replay inline-toolbar scenarios against the in-memory host.
//!
//! # Usage
//!
//! ```bash
//! bubblebar                    # run the built-in link-flow demo
//! bubblebar scenario.json
//! bubblebar --commands scenario.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bubblebar::scenario::{Replay, Scenario, replay};

/// Replay an inline-toolbar scenario and report bubble behavior
#[derive(Parser, Debug)]
#[command(name = "bubblebar", version, about, long_about = None)]
struct Cli {
    /// Scenario file to replay (JSON); omit to run the built-in demo
    #[arg(value_name = "SCENARIO")]
    scenario: Option<PathBuf>,

    /// Print the formatting commands issued to the host capability
    #[arg(long)]
    commands: bool,

    /// Log state transitions and effects at debug level
    #[arg(long)]
    debug: bool,
}

const DEMO: &str = include_str!("../demos/link-flow.json");

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::from_json(DEMO).context("built-in demo scenario is invalid")?,
    };

    let outcome = replay(&scenario).context("scenario replay failed")?;
    print_report(&outcome, cli.commands);
    Ok(())
}

fn print_report(outcome: &Replay, show_commands: bool) {
    for line in &outcome.lines {
        let surface = &line.surface;
        println!(
            "{:>6}ms  {:<20} bubble={:<6} pos=({:.1}, {:.1})  [{} {} {} {}]{}",
            line.at,
            line.action,
            format!("{:?}", surface.visual),
            surface.position.top,
            surface.position.left,
            flag("b", surface.buttons.bold),
            flag("i", surface.buttons.italic),
            flag("q", surface.buttons.quote),
            flag("a", surface.buttons.link),
            if surface.url_mode { "  url-input" } else { "" },
        );
    }
    let end = &outcome.surface;
    println!(
        "settled: bubble={:?} url-mode={} input=\"{}\"",
        end.visual, end.url_mode, end.url_input
    );
    if show_commands {
        println!();
        println!("formatting commands issued:");
        for command in &outcome.commands {
            println!("  {command:?}");
        }
    }
}

fn flag(name: &str, active: bool) -> String {
    if active {
        name.to_uppercase()
    } else {
        name.to_string()
    }
}
