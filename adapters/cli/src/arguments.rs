//! Command-line arguments accepted by the Maze Crawler binary.

use std::path::PathBuf;

use clap::Parser;
use maze_crawler_core::Position;
use maze_crawler_system_bootstrap::SessionParameters;

/// Navigate a grid maze: replay a computed route, then steer the agent by hand.
#[derive(Debug, Parser)]
#[command(name = "maze-crawler", version)]
pub(crate) struct CliArgs {
    /// Path to a grid literal, one bracketed row per line.
    pub(crate) maze: PathBuf,

    /// Start coordinate as ROW,COL. Defaults to 0,0.
    #[arg(long, value_parser = parse_position)]
    pub(crate) start: Option<Position>,

    /// Goal coordinate as ROW,COL. Defaults to the bottom-right cell.
    #[arg(long, value_parser = parse_position)]
    pub(crate) goal: Option<Position>,

    /// Use the grid's Start (2) and Goal (3) cells when no coordinate is given.
    #[arg(long)]
    pub(crate) from_markers: bool,

    /// Pause after every frame, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub(crate) delay_ms: u64,

    /// Write the session report as JSON to this path.
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,

    /// Exit without waiting for Enter after reaching the goal.
    #[arg(long)]
    pub(crate) no_wait: bool,

    /// Print the route overlaid on the grid before replaying it.
    #[arg(long)]
    pub(crate) preview_route: bool,

    /// Comma-separated commands (w, a, s, d, q) to use instead of standard input.
    #[arg(long, value_delimiter = ',')]
    pub(crate) moves: Option<Vec<String>>,
}

impl CliArgs {
    pub(crate) fn session_parameters(&self) -> SessionParameters {
        SessionParameters {
            start: self.start,
            goal: self.goal,
            from_markers: self.from_markers,
        }
    }
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (row, column) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but found '{value}'"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid row '{}': {error}", row.trim()))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid column '{}': {error}", column.trim()))?;
    Ok(Position::new(row, column))
}
