#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Crawler engine.
//!
//! This crate defines the vocabulary that connects the grid model, the pure
//! systems, and the adapters. Adapters translate raw input into [`Command`]
//! values, the traversal controller executes those commands against the grid
//! and broadcasts [`Event`] values describing what happened, and presentation
//! layers consume the events together with read-only snapshots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Crawler.";

/// Smallest value the sensing radius and step size may take.
pub const MIN_MODIFIER: u8 = 1;

/// Largest value the sensing radius and step size may take.
pub const MAX_MODIFIER: u8 = 3;

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Position one cell away in the provided direction.
    ///
    /// Returns `None` when the step would underflow the zero row or column.
    /// Upper bounds are unknown here and must be checked against the grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
        }
    }

    /// Reports whether the two positions share an edge.
    #[must_use]
    pub fn is_adjacent_to(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(label)
    }
}

/// Environmental cells that improve one of the traversal parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Booster {
    /// Goggles that widen the sensing radius.
    Perception,
    /// Potion that lengthens the step size.
    Speed,
    /// Positive code without a known effect.
    Other(i32),
}

/// Environmental cells that impair one of the traversal parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hurdle {
    /// Fog that narrows the sensing radius.
    Fog,
    /// Potion that shortens the step size.
    Slowdown,
    /// Negative code without a known effect.
    Other(i32),
}

/// Semantic category of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    /// Free floor.
    Empty,
    /// Impassable wall.
    Wall,
    /// Start marker.
    Start,
    /// Goal marker.
    Goal,
    /// Cell the agent has already passed through.
    Trail,
    /// Booster consumed on entry.
    Booster(Booster),
    /// Hurdle consumed on entry.
    Hurdle(Hurdle),
}

impl CellClass {
    const EMPTY: i32 = 0;
    const WALL: i32 = 1;
    const START: i32 = 2;
    const GOAL: i32 = 3;
    const PERCEPTION_BOOSTER: i32 = 4;
    const SPEED_BOOSTER: i32 = 5;
    const FOG: i32 = -6;
    const SLOWDOWN: i32 = -7;
    const TRAIL: i32 = 8;

    /// Classifies a raw integer cell code.
    ///
    /// Codes outside the canonical table are treated as unclassified boosters
    /// when positive and unclassified hurdles when negative.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            Self::EMPTY => Self::Empty,
            Self::WALL => Self::Wall,
            Self::START => Self::Start,
            Self::GOAL => Self::Goal,
            Self::TRAIL => Self::Trail,
            Self::PERCEPTION_BOOSTER => Self::Booster(Booster::Perception),
            Self::SPEED_BOOSTER => Self::Booster(Booster::Speed),
            Self::FOG => Self::Hurdle(Hurdle::Fog),
            Self::SLOWDOWN => Self::Hurdle(Hurdle::Slowdown),
            other if other > 0 => Self::Booster(Booster::Other(other)),
            other => Self::Hurdle(Hurdle::Other(other)),
        }
    }

    /// Raw integer code stored in the grid for this class.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Empty => Self::EMPTY,
            Self::Wall => Self::WALL,
            Self::Start => Self::START,
            Self::Goal => Self::GOAL,
            Self::Trail => Self::TRAIL,
            Self::Booster(Booster::Perception) => Self::PERCEPTION_BOOSTER,
            Self::Booster(Booster::Speed) => Self::SPEED_BOOSTER,
            Self::Booster(Booster::Other(code)) | Self::Hurdle(Hurdle::Other(code)) => code,
            Self::Hurdle(Hurdle::Fog) => Self::FOG,
            Self::Hurdle(Hurdle::Slowdown) => Self::SLOWDOWN,
        }
    }

    /// Reports whether entering the cell counts as a neutral, scoring step.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Empty | Self::Start | Self::Goal | Self::Trail)
    }
}

impl fmt::Display for CellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty floor"),
            Self::Wall => f.write_str("a wall"),
            Self::Start => f.write_str("the start marker"),
            Self::Goal => f.write_str("the goal marker"),
            Self::Trail => f.write_str("your trail"),
            Self::Booster(Booster::Perception) => f.write_str("a pair of goggles"),
            Self::Booster(Booster::Speed) => f.write_str("a speed potion"),
            Self::Booster(Booster::Other(code)) => write!(f, "a booster ({code})"),
            Self::Hurdle(Hurdle::Fog) => f.write_str("fog"),
            Self::Hurdle(Hurdle::Slowdown) => f.write_str("a slowpoke potion"),
            Self::Hurdle(Hurdle::Other(code)) => write!(f, "a hurdle ({code})"),
        }
    }
}

/// Bounded traversal parameters and the running score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraversalState {
    sensing_radius: u8,
    step_size: u8,
    score: u32,
}

impl TraversalState {
    /// Creates a state, clamping both modifiers into `MIN_MODIFIER..=MAX_MODIFIER`.
    #[must_use]
    pub fn new(sensing_radius: u8, step_size: u8, score: u32) -> Self {
        Self {
            sensing_radius: sensing_radius.clamp(MIN_MODIFIER, MAX_MODIFIER),
            step_size: step_size.clamp(MIN_MODIFIER, MAX_MODIFIER),
            score,
        }
    }

    /// How far the agent can sense, in cells.
    #[must_use]
    pub const fn sensing_radius(&self) -> u8 {
        self.sensing_radius
    }

    /// How many cells the agent covers per stride.
    #[must_use]
    pub const fn step_size(&self) -> u8 {
        self.step_size
    }

    /// Number of neutral steps taken so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }
}

impl Default for TraversalState {
    fn default() -> Self {
        Self {
            sensing_radius: MIN_MODIFIER,
            step_size: MIN_MODIFIER,
            score: 0,
        }
    }
}

/// Broad category of a modifier evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierCategory {
    /// A booster cell was entered.
    Booster,
    /// A hurdle cell was entered.
    Hurdle,
    /// A neutral cell was entered.
    Neutral,
}

/// Specific effect produced by entering a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierEffect {
    /// Goggles raised the sensing radius.
    PerceptionBoosted,
    /// A speed potion raised the step size.
    SpeedBoosted,
    /// Fog lowered the sensing radius.
    Fogged,
    /// A slowpoke potion lowered the step size.
    Slowed,
    /// Booster code without a numeric effect.
    UnclassifiedBooster(i32),
    /// Hurdle code without a numeric effect.
    UnclassifiedHurdle(i32),
    /// Neutral cell; the score advanced by one.
    Neutral,
}

impl ModifierEffect {
    /// Broad category of the effect.
    #[must_use]
    pub const fn category(self) -> ModifierCategory {
        match self {
            Self::PerceptionBoosted | Self::SpeedBoosted | Self::UnclassifiedBooster(_) => {
                ModifierCategory::Booster
            }
            Self::Fogged | Self::Slowed | Self::UnclassifiedHurdle(_) => ModifierCategory::Hurdle,
            Self::Neutral => ModifierCategory::Neutral,
        }
    }
}

impl fmt::Display for ModifierEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerceptionBoosted => {
                f.write_str("Booster detected: goggles widen the sensing radius")
            }
            Self::SpeedBoosted => {
                f.write_str("Booster detected: speed potion lengthens the stride")
            }
            Self::Fogged => f.write_str("Hurdle detected: fog narrows the sensing radius"),
            Self::Slowed => f.write_str("Hurdle detected: slowpoke potion shortens the stride"),
            Self::UnclassifiedBooster(code) => write!(f, "Booster detected with value: {code}"),
            Self::UnclassifiedHurdle(code) => write!(f, "Hurdle detected with value: {code}"),
            Self::Neutral => f.write_str("No booster or hurdle detected"),
        }
    }
}

/// Result of evaluating a single entered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierOutcome {
    /// Traversal state after the cell was applied.
    pub state: TraversalState,
    /// What happened while entering the cell.
    pub effect: ModifierEffect,
}

/// Ordered sequence of 4-adjacent positions connecting a start to a goal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    positions: Vec<Position>,
}

impl Route {
    /// Wraps an already validated sequence of positions.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Route with no positions, used when no route could be found.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Positions of the route in travel order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions on the route, both endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Reports whether the route contains no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// First position of the route.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    /// Last position of the route.
    #[must_use]
    pub fn goal(&self) -> Option<Position> {
        self.positions.last().copied()
    }

    /// Consumes the route, yielding the underlying positions.
    #[must_use]
    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }
}

/// Commands accepted while the session is interactive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Attempt to move the agent one cell in the direction.
    Move {
        /// Direction of the attempted move.
        direction: Direction,
    },
    /// End the session immediately.
    Quit,
}

impl Command {
    /// Translates a single input token into a command.
    ///
    /// Accepts `w`/`a`/`s`/`d`/`q` in either case as well as the spelled out
    /// direction names and `quit`.
    pub fn from_token(token: &str) -> Result<Self, UnrecognizedCommand> {
        let trimmed = token.trim();
        let command = match trimmed.to_ascii_lowercase().as_str() {
            "w" | "up" => Self::Move {
                direction: Direction::Up,
            },
            "a" | "left" => Self::Move {
                direction: Direction::Left,
            },
            "s" | "down" => Self::Move {
                direction: Direction::Down,
            },
            "d" | "right" => Self::Move {
                direction: Direction::Right,
            },
            "q" | "quit" => Self::Quit,
            _ => return Err(UnrecognizedCommand(trimmed.to_owned())),
        };
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = UnrecognizedCommand;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_token(value)
    }
}

/// Input token that does not map to any command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized command '{0}'")]
pub struct UnrecognizedCommand(pub String);

/// Lifecycle phase of a traversal session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The computed route is being replayed autonomously.
    Replaying,
    /// The session accepts directional commands.
    Interactive,
    /// The session ended.
    Finished,
}

/// How a session reached the finished phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// The agent stepped onto the goal.
    GoalReached,
    /// The player asked to quit.
    Quit,
    /// The command source ran dry.
    InputExhausted,
}

/// Reasons an interactive move may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The candidate cell lies outside the grid.
    OutOfBounds,
    /// The candidate cell is not empty.
    Blocked(CellClass),
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("the move leaves the maze"),
            Self::Blocked(class) => write!(f, "the cell holds {class}"),
        }
    }
}

/// Events broadcast by the traversal controller after processing input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// One position of the route was replayed.
    RouteStepReplayed {
        /// Position that was entered.
        position: Position,
        /// Classification of the cell before it was marked as trail.
        cell: CellClass,
        /// Modifier evaluation for the cell.
        outcome: ModifierOutcome,
    },
    /// An interactive move was accepted.
    AgentMoved {
        /// Cell the agent occupied before moving.
        from: Position,
        /// Cell the agent occupies after moving.
        to: Position,
        /// Classification of the destination before it was marked as trail.
        cell: CellClass,
        /// Modifier evaluation for the destination.
        outcome: ModifierOutcome,
    },
    /// An interactive move was rejected; no state changed.
    MoveRejected {
        /// Direction of the rejected move.
        direction: Direction,
        /// Why the move was rejected.
        reason: MoveRejection,
    },
    /// An input token did not map to a command; no state changed.
    CommandUnrecognized {
        /// Offending token.
        token: String,
    },
    /// The session finished.
    Finished {
        /// How the session ended.
        outcome: SessionOutcome,
        /// Final score.
        score: u32,
    },
}

/// Errors raised when accessing or building a grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The position lies outside the grid extents.
    #[error("position {position} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Offending position.
        position: Position,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// The grid has no rows or no columns.
    #[error("grid must contain at least one row and one column")]
    Empty,
    /// The grid has more rows or columns than a coordinate can address.
    #[error("grid dimensions exceed the addressable range")]
    TooLarge,
    /// A row length differs from the first row.
    #[error("row {row} has {found} cells but {expected} were expected")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

/// Errors raised by route search.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The search exhausted its frontier without reaching the goal.
    #[error("no route connects {start} to {goal}")]
    NoRouteFound {
        /// Requested start position.
        start: Position,
        /// Requested goal position.
        goal: Position,
    },
    /// An endpoint lies outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}
