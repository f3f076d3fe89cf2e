#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic depth-first route search over the maze grid.
//!
//! The search keeps a strictly LIFO frontier. Every frontier node carries the
//! Manhattan distance to the goal, but that estimate never reorders the
//! frontier: the result is the first route this traversal order stumbles on,
//! not necessarily the shortest one.

use std::collections::{HashMap, HashSet};

use maze_crawler_core::{Direction, Position, Route, RouteError};
use maze_crawler_world::Grid;
use tracing::{debug, trace, warn};

/// Order in which neighbours are pushed onto the frontier.
///
/// The last entry is popped first.
pub const SEARCH_ORDER: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

/// Searches for a route from `start` to `goal` over traversable cells.
///
/// Both endpoints must lie inside the grid. The start cell itself is never
/// tested for traversability; every other cell on the route is.
pub fn find_route(grid: &Grid, start: Position, goal: Position) -> Result<Route, RouteError> {
    grid.ensure_contains(start)?;
    grid.ensure_contains(goal)?;

    let mut frontier = vec![FrontierNode::root(start, goal)];
    let mut came_from: HashMap<Position, Option<Position>> = HashMap::new();
    let mut expanded: HashSet<Position> = HashSet::new();

    while let Some(node) = frontier.pop() {
        if !expanded.insert(node.position) {
            continue;
        }
        let _ = came_from.insert(node.position, node.parent);
        trace!(
            position = %node.position,
            cost = node.cost,
            heuristic = node.heuristic,
            "expanding frontier node"
        );

        if node.position == goal {
            let route = reconstruct(&came_from, goal);
            debug!(
                length = route.len(),
                expanded = expanded.len(),
                "route found"
            );
            return Ok(route);
        }

        for direction in SEARCH_ORDER {
            let Some(neighbor) = grid.neighbor(node.position, direction) else {
                continue;
            };
            if expanded.contains(&neighbor) || !grid.is_traversable(neighbor)? {
                continue;
            }
            frontier.push(node.child(neighbor, goal));
        }
    }

    warn!(%start, %goal, expanded = expanded.len(), "frontier exhausted without reaching goal");
    Err(RouteError::NoRouteFound { start, goal })
}

#[derive(Clone, Copy, Debug)]
struct FrontierNode {
    position: Position,
    parent: Option<Position>,
    cost: u32,
    heuristic: u32,
}

impl FrontierNode {
    fn root(position: Position, goal: Position) -> Self {
        Self {
            position,
            parent: None,
            cost: 0,
            heuristic: position.manhattan_distance(goal),
        }
    }

    fn child(&self, position: Position, goal: Position) -> Self {
        Self {
            position,
            parent: Some(self.position),
            cost: self.cost.saturating_add(1),
            heuristic: position.manhattan_distance(goal),
        }
    }
}

fn reconstruct(came_from: &HashMap<Position, Option<Position>>, goal: Position) -> Route {
    let mut positions = vec![goal];
    let mut cursor = goal;
    while let Some(&Some(parent)) = came_from.get(&cursor) {
        positions.push(parent);
        cursor = parent;
    }
    positions.reverse();
    Route::from_positions(positions)
}
