#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared text rendering contracts for Maze Crawler adapters.

use std::{fmt, thread, time::Duration};

use anyhow::Result as AnyResult;
use maze_crawler_core::{Booster, CellClass, Event, Hurdle, Phase, Position, SessionOutcome};
use maze_crawler_system_traversal::{Frame, FrameSink};

/// Glyph drawn on the cell the agent occupies.
pub const AGENT_GLYPH: char = '@';

/// Glyph drawn on the route position currently being replayed.
pub const CURSOR_GLYPH: char = 'o';

/// Glyph used for a cell class.
#[must_use]
pub const fn glyph(class: CellClass) -> char {
    match class {
        CellClass::Empty => '.',
        CellClass::Wall => '#',
        CellClass::Start => 'S',
        CellClass::Goal => 'G',
        CellClass::Trail => '*',
        CellClass::Booster(Booster::Perception) => 'g',
        CellClass::Booster(Booster::Speed) => 'P',
        CellClass::Booster(Booster::Other(_)) => '+',
        CellClass::Hurdle(Hurdle::Fog) => 'F',
        CellClass::Hurdle(Hurdle::Slowdown) => 'p',
        CellClass::Hurdle(Hurdle::Other(_)) => '-',
    }
}

/// Fully composed text frame ready for a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFrame {
    /// One line per grid row.
    pub rows: Vec<String>,
    /// Score, modifiers and facing.
    pub status: String,
    /// Human-readable descriptions of the frame's events.
    pub messages: Vec<String>,
    /// Whether the frame was produced while the session awaits input.
    pub awaiting_input: bool,
}

impl TextFrame {
    /// Composes the text representation of a session frame.
    #[must_use]
    pub fn compose(frame: &Frame<'_>) -> Self {
        let columns = frame.grid.columns();
        let rows = frame
            .grid
            .iter_rows()
            .zip(0u32..)
            .map(|(cells, row)| {
                cells
                    .iter()
                    .zip(0..columns)
                    .map(|(&code, column)| {
                        let here = Position::new(row, column);
                        if frame.cursor == Some(here) {
                            CURSOR_GLYPH
                        } else if frame.agent == here && frame.phase != Phase::Replaying {
                            AGENT_GLYPH
                        } else {
                            glyph(CellClass::from_code(code))
                        }
                    })
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        let status = format!(
            "Score: {}  Sensing: {}  Step: {}  Facing: {}",
            frame.state.score(),
            frame.state.sensing_radius(),
            frame.state.step_size(),
            frame.facing,
        );

        Self {
            rows,
            status,
            messages: frame.events.iter().filter_map(describe).collect(),
            awaiting_input: frame.phase == Phase::Interactive,
        }
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        writeln!(f, "{}", self.status)?;
        for message in &self.messages {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}

/// Describes an event for the player, if it deserves a message.
#[must_use]
pub fn describe(event: &Event) -> Option<String> {
    match event {
        Event::RouteStepReplayed { outcome, .. } | Event::AgentMoved { outcome, .. } => {
            Some(outcome.effect.to_string())
        }
        Event::MoveRejected { direction, reason } => {
            Some(format!("Invalid move {direction}: {reason}. Try again."))
        }
        Event::CommandUnrecognized { token } => {
            Some(format!("Invalid move '{token}'. Try again."))
        }
        Event::PhaseChanged {
            phase: Phase::Interactive,
        } => Some("Route replay finished. Your turn.".to_owned()),
        Event::PhaseChanged { .. } => None,
        Event::Finished { outcome, score } => Some(match outcome {
            SessionOutcome::GoalReached => {
                format!("Congratulations! You reached the goal. Total Score: {score}")
            }
            SessionOutcome::Quit => format!("Quitting the game. Total Score: {score}"),
            SessionOutcome::InputExhausted => {
                format!("Input closed. Total Score: {score}")
            }
        }),
    }
}

/// Rendering backend capable of presenting text frames.
pub trait RenderingBackend {
    /// Presents a composed frame.
    fn present(&mut self, frame: &TextFrame) -> AnyResult<()>;
}

/// Frame sink that composes text frames and paces them for visualisation.
#[derive(Debug)]
pub struct TextSink<B> {
    backend: B,
    delay: Duration,
}

impl<B> TextSink<B>
where
    B: RenderingBackend,
{
    /// Wraps a backend without any pacing delay.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            delay: Duration::ZERO,
        }
    }

    /// Pauses for `delay` after every presented frame.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Consumes the sink, yielding the backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B> FrameSink for TextSink<B>
where
    B: RenderingBackend,
{
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()> {
        self.backend.present(&TextFrame::compose(frame))?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }
}
