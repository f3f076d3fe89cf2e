//! Session loop wiring the controller to injected input and output seams.

use std::collections::VecDeque;

use anyhow::{Context, Result as AnyResult};
use maze_crawler_core::{Direction, Event, Phase, Position, TraversalState};
use maze_crawler_world::Grid;

use crate::TraversalController;

/// Supplier of raw interactive input tokens.
pub trait CommandSource {
    /// Blocks until the next token is available.
    ///
    /// Returns `Ok(None)` once no further input will arrive.
    fn next_token(&mut self) -> AnyResult<Option<String>>;
}

/// Consumer of rendered session frames.
pub trait FrameSink {
    /// Presents a single frame. Called after every replay step and after
    /// every interactive token.
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()>;
}

/// Read-only view of the session handed to a [`FrameSink`].
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Grid as currently marked.
    pub grid: &'a Grid,
    /// Cell the agent occupies.
    pub agent: Position,
    /// Route position being replayed, if replay is running.
    pub cursor: Option<Position>,
    /// Orientation of the agent.
    pub facing: Direction,
    /// Sensing radius, step size and score.
    pub state: TraversalState,
    /// Active phase.
    pub phase: Phase,
    /// Events produced since the previous frame.
    pub events: &'a [Event],
}

impl<'a> Frame<'a> {
    fn capture(controller: &'a TraversalController, events: &'a [Event]) -> Self {
        let session = controller.session();
        Self {
            grid: session.grid(),
            agent: session.agent(),
            cursor: controller.cursor(),
            facing: session.facing(),
            state: session.state(),
            phase: controller.phase(),
            events,
        }
    }
}

/// Command source backed by a fixed list of tokens.
#[derive(Clone, Debug, Default)]
pub struct ScriptedCommands {
    tokens: VecDeque<String>,
}

impl ScriptedCommands {
    /// Creates a source that yields the provided tokens in order.
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of tokens not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_token(&mut self) -> AnyResult<Option<String>> {
        Ok(self.tokens.pop_front())
    }
}

/// Runs the session to completion and returns every event it produced.
///
/// The initial grid is presented first, then each replay step, then each
/// interactive token until the session finishes.
pub fn run<S, F>(
    controller: &mut TraversalController,
    source: &mut S,
    sink: &mut F,
) -> AnyResult<Vec<Event>>
where
    S: CommandSource + ?Sized,
    F: FrameSink + ?Sized,
{
    let mut log = Vec::new();
    sink.present(&Frame::capture(controller, &[]))?;

    loop {
        let mut events = Vec::new();
        let stepped = controller
            .step_replay(&mut events)
            .context("route replay left the grid")?;
        sink.present(&Frame::capture(controller, &events))?;
        log.append(&mut events);
        if stepped.is_none() {
            break;
        }
    }

    while controller.phase() == Phase::Interactive {
        let mut events = Vec::new();
        match source.next_token()? {
            Some(token) => controller.handle_token(&token, &mut events),
            None => controller.exhaust_input(&mut events),
        }
        sink.present(&Frame::capture(controller, &events))?;
        log.append(&mut events);
    }

    Ok(log)
}
