#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Maze Crawler session in the terminal.

mod arguments;
mod console;

use std::{fs, io, time::Duration};

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use maze_crawler_core::{Phase, SessionOutcome, TraversalState};
use maze_crawler_rendering::{RenderingBackend, TextFrame, TextSink};
use maze_crawler_system_analytics::Analytics;
use maze_crawler_system_bootstrap::Bootstrap;
use maze_crawler_system_traversal::{run, CommandSource, Frame, ScriptedCommands};
use maze_crawler_world::parse_grid;
use tracing::info;

use crate::{
    arguments::CliArgs,
    console::{acknowledge, PromptedCommands, StdoutBackend},
};

/// Entry point for the Maze Crawler command-line interface.
fn main() -> AnyResult<()> {
    init_tracing();
    let args = CliArgs::parse();

    let text = fs::read_to_string(&args.maze)
        .with_context(|| format!("failed to read maze file {}", args.maze.display()))?;
    let grid = parse_grid(&text)
        .with_context(|| format!("failed to parse maze file {}", args.maze.display()))?;

    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner());
    let launch = bootstrap
        .prepare(grid, args.session_parameters())
        .context("invalid session parameters")?;
    info!(start = %launch.start, goal = %launch.goal, "session prepared");

    if args.preview_route {
        if let Some(route) = &launch.route {
            let mut preview = launch.controller.session().grid().clone();
            preview.mark_route(route).context("route left the grid")?;
            let frame = Frame {
                grid: &preview,
                agent: launch.start,
                cursor: None,
                facing: launch.controller.session().facing(),
                state: TraversalState::default(),
                phase: Phase::Replaying,
                events: &[],
            };
            StdoutBackend.present(&TextFrame::compose(&frame))?;
        }
    }

    let route_length = launch.route.as_ref().map_or(0, |route| route.len());
    let mut controller = launch.controller;
    let mut sink = TextSink::new(StdoutBackend).with_delay(Duration::from_millis(args.delay_ms));
    let scripted = args.moves.is_some();
    let mut source: Box<dyn CommandSource> = match args.moves.clone() {
        Some(tokens) => Box::new(ScriptedCommands::new(tokens)),
        None => Box::new(PromptedCommands::new(io::stdin().lock())),
    };
    let events = run(&mut controller, source.as_mut(), &mut sink)?;
    drop(source);

    let mut analytics = Analytics::new(route_length);
    analytics.handle(&events);
    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(analytics.report())
            .context("failed to serialize session report")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    if controller.outcome() == Some(SessionOutcome::GoalReached) && !args.no_wait && !scripted {
        acknowledge(io::stdin().lock())?;
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
