#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that resolves session parameters and prepares a traversal.

use maze_crawler_core::{CellClass, GridError, Position, Route, RouteError, WELCOME_BANNER};
use maze_crawler_system_pathfinding::find_route;
use maze_crawler_system_traversal::{Session, TraversalController};
use maze_crawler_world::Grid;
use tracing::{info, warn};

/// Externally supplied session parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionParameters {
    /// Explicit start coordinate.
    pub start: Option<Position>,
    /// Explicit goal coordinate.
    pub goal: Option<Position>,
    /// Fall back to the grid's start and goal markers before the defaults.
    pub from_markers: bool,
}

/// Everything needed to run a session.
#[derive(Debug)]
pub struct Launch {
    /// Controller ready to replay the route.
    pub controller: TraversalController,
    /// Route handed to the controller, `None` when the goal was unreachable.
    pub route: Option<Route>,
    /// Resolved start coordinate.
    pub start: Position,
    /// Resolved goal coordinate.
    pub goal: Position,
}

/// Prepares traversal sessions.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Banner shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Resolves the start and goal coordinates for the grid.
    ///
    /// Explicit coordinates win. With `from_markers` set, the first `Start`
    /// and `Goal` cells in row-major order come next. Otherwise the start is
    /// the top-left cell and the goal the bottom-right cell.
    #[must_use]
    pub fn resolve(&self, grid: &Grid, parameters: SessionParameters) -> (Position, Position) {
        let marker = |class| {
            if parameters.from_markers {
                grid.locate(class)
            } else {
                None
            }
        };
        let start = parameters
            .start
            .or_else(|| marker(CellClass::Start))
            .unwrap_or(Position::new(0, 0));
        let goal = parameters
            .goal
            .or_else(|| marker(CellClass::Goal))
            .unwrap_or_else(|| far_corner(grid));
        (start, goal)
    }

    /// Resolves parameters, searches for a route and builds the controller.
    ///
    /// An unreachable goal is not fatal: the controller receives an empty
    /// route and goes straight to interactive play.
    pub fn prepare(&self, grid: Grid, parameters: SessionParameters) -> Result<Launch, GridError> {
        let (start, goal) = self.resolve(&grid, parameters);
        let route = match find_route(&grid, start, goal) {
            Ok(route) => {
                info!(%start, %goal, length = route.len(), "route computed");
                Some(route)
            }
            Err(RouteError::NoRouteFound { .. }) => {
                warn!(%start, %goal, "no route found; replay will be empty");
                None
            }
            Err(RouteError::Grid(error)) => return Err(error),
        };

        let session = Session::new(grid, start, goal)?;
        let controller =
            TraversalController::new(session, route.clone().unwrap_or_else(Route::empty));
        Ok(Launch {
            controller,
            route,
            start,
            goal,
        })
    }
}

fn far_corner(grid: &Grid) -> Position {
    Position::new(
        grid.rows().saturating_sub(1),
        grid.columns().saturating_sub(1),
    )
}
