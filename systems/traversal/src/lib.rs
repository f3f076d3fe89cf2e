#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Traversal controller that replays a route and then runs the interactive loop.
//!
//! The controller moves through three phases. While [`Phase::Replaying`] it
//! consumes the route one position at a time; every non-wall cell on the
//! route is walkable. Once the route is exhausted it turns
//! [`Phase::Interactive`] and accepts [`Command`] values, where only empty
//! cells may be entered. [`Phase::Finished`] is terminal.

mod driver;

pub use driver::{run, CommandSource, Frame, FrameSink, ScriptedCommands};

use maze_crawler_core::{
    Command, Direction, Event, GridError, MoveRejection, Phase, Position, Route, SessionOutcome,
    TraversalState,
};
use maze_crawler_system_modifiers::ModifierEngine;
use maze_crawler_world::Grid;
use tracing::{debug, info};

/// Mutable state owned by a single traversal session.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    agent: Position,
    goal: Position,
    facing: Direction,
    modifiers: ModifierEngine,
}

impl Session {
    /// Creates a session with the agent standing on `start`.
    ///
    /// Both coordinates must lie inside the grid.
    pub fn new(grid: Grid, start: Position, goal: Position) -> Result<Self, GridError> {
        grid.ensure_contains(start)?;
        grid.ensure_contains(goal)?;
        Ok(Self {
            grid,
            agent: start,
            goal,
            facing: Direction::Up,
            modifiers: ModifierEngine::default(),
        })
    }

    /// Grid as currently marked by the traversal.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell the agent currently occupies.
    #[must_use]
    pub const fn agent(&self) -> Position {
        self.agent
    }

    /// Cell the agent must reach.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Orientation shown alongside the agent.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Sensing radius, step size and score.
    #[must_use]
    pub const fn state(&self) -> TraversalState {
        self.modifiers.state()
    }

    /// Consumes the session, yielding the marked grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Drives a session through replay and interactive play.
#[derive(Debug)]
pub struct TraversalController {
    session: Session,
    route: std::vec::IntoIter<Position>,
    phase: Phase,
    cursor: Option<Position>,
    outcome: Option<SessionOutcome>,
}

impl TraversalController {
    /// Creates a controller that will replay `route` over the session.
    ///
    /// An empty route is valid and makes the replay phase a no-op.
    #[must_use]
    pub fn new(session: Session, route: Route) -> Self {
        Self {
            session,
            route: route.into_positions().into_iter(),
            phase: Phase::Replaying,
            cursor: None,
            outcome: None,
        }
    }

    /// Session owned by the controller.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Active phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Route position replayed most recently, while replay is running.
    #[must_use]
    pub const fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    /// How the session ended, once it has.
    #[must_use]
    pub const fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Consumes the controller, yielding its session.
    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Replays the next route position.
    ///
    /// The cell is classified before it is marked as trail so its modifier
    /// applies. Returns the replayed position, or `None` once the route is
    /// exhausted, at which point the controller turns interactive.
    pub fn step_replay(&mut self, out: &mut Vec<Event>) -> Result<Option<Position>, GridError> {
        if self.phase != Phase::Replaying {
            return Ok(None);
        }

        let Some(position) = self.route.next() else {
            self.enter_interactive(out);
            return Ok(None);
        };

        let cell = self.session.grid.classify(position)?;
        let outcome = self.session.modifiers.apply(cell);
        let _ = self.session.grid.mark_visited(position)?;
        self.cursor = Some(position);
        debug!(%position, effect = %outcome.effect, "replayed route step");
        out.push(Event::RouteStepReplayed {
            position,
            cell,
            outcome,
        });
        Ok(Some(position))
    }

    /// Replays every remaining route position and turns interactive.
    pub fn replay(&mut self, out: &mut Vec<Event>) -> Result<(), GridError> {
        while self.step_replay(out)?.is_some() {}
        Ok(())
    }

    /// Applies an interactive command.
    ///
    /// Commands are ignored outside the interactive phase.
    pub fn handle(&mut self, command: Command, out: &mut Vec<Event>) {
        if self.phase != Phase::Interactive {
            debug!(?command, phase = ?self.phase, "ignoring command outside interactive phase");
            return;
        }

        match command {
            Command::Move { direction } => self.try_move(direction, out),
            Command::Quit => self.finish(SessionOutcome::Quit, out),
        }
    }

    /// Parses and applies a raw input token.
    ///
    /// Unrecognized tokens leave all state untouched and are reported so the
    /// adapter can re-prompt.
    pub fn handle_token(&mut self, token: &str, out: &mut Vec<Event>) {
        match Command::from_token(token) {
            Ok(command) => self.handle(command, out),
            Err(error) => {
                if self.phase == Phase::Interactive {
                    debug!(%error, "unrecognized command");
                    out.push(Event::CommandUnrecognized { token: error.0 });
                }
            }
        }
    }

    /// Ends the session because no further input will arrive.
    pub fn exhaust_input(&mut self, out: &mut Vec<Event>) {
        if self.phase != Phase::Finished {
            self.finish(SessionOutcome::InputExhausted, out);
        }
    }

    fn try_move(&mut self, direction: Direction, out: &mut Vec<Event>) {
        let Some(candidate) = self.session.grid.neighbor(self.session.agent, direction) else {
            return reject(direction, MoveRejection::OutOfBounds, out);
        };

        match self.session.grid.is_vacant(candidate) {
            Ok(true) => {}
            Ok(false) => {
                let reason = self
                    .session
                    .grid
                    .classify(candidate)
                    .map_or(MoveRejection::OutOfBounds, MoveRejection::Blocked);
                return reject(direction, reason, out);
            }
            Err(_) => return reject(direction, MoveRejection::OutOfBounds, out),
        }

        let Ok(cell) = self.session.grid.mark_visited(candidate) else {
            return reject(direction, MoveRejection::OutOfBounds, out);
        };
        let from = self.session.agent;
        self.session.agent = candidate;
        self.session.facing = direction;
        let outcome = self.session.modifiers.apply(cell);
        debug!(%from, to = %candidate, score = outcome.state.score(), "agent moved");
        out.push(Event::AgentMoved {
            from,
            to: candidate,
            cell,
            outcome,
        });

        if self.session.agent == self.session.goal {
            self.finish(SessionOutcome::GoalReached, out);
        }
    }

    fn enter_interactive(&mut self, out: &mut Vec<Event>) {
        self.phase = Phase::Interactive;
        self.cursor = None;
        info!(score = self.session.state().score(), "route replay complete");
        out.push(Event::PhaseChanged {
            phase: Phase::Interactive,
        });

        if self.session.agent == self.session.goal {
            self.finish(SessionOutcome::GoalReached, out);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome, out: &mut Vec<Event>) {
        let score = self.session.state().score();
        self.phase = Phase::Finished;
        self.outcome = Some(outcome);
        info!(?outcome, score, "session finished");
        out.push(Event::PhaseChanged {
            phase: Phase::Finished,
        });
        out.push(Event::Finished { outcome, score });
    }
}

fn reject(direction: Direction, reason: MoveRejection, out: &mut Vec<Event>) {
    debug!(%direction, %reason, "move rejected");
    out.push(Event::MoveRejected { direction, reason });
}
