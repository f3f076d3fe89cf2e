#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid model for Maze Crawler.
//!
//! The grid stores one integer code per cell in row-major order and exposes
//! the classification rules used by the systems. Two walkability predicates
//! coexist: [`Grid::is_traversable`] governs route search and
//! autonomous replay, while [`Grid::is_vacant`] governs manual moves.

mod ingest;

pub use ingest::{parse_grid, ParseError};

use maze_crawler_core::{CellClass, Direction, GridError, Position, Route};

/// Rectangular maze of classified cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<i32>,
}

impl Grid {
    /// Builds a grid from row vectors of raw cell codes.
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || expected == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: index,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: u32::try_from(rows.len()).map_err(|_| GridError::TooLarge)?,
            columns: u32::try_from(expected).map_err(|_| GridError::TooLarge)?,
            cells,
        })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the position lies within the grid extents.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }

    /// Fails with [`GridError::OutOfBounds`] unless the position is inside the grid.
    pub fn ensure_contains(&self, position: Position) -> Result<(), GridError> {
        self.index(position).map(|_| ())
    }

    /// Classification of the cell at the position.
    pub fn classify(&self, position: Position) -> Result<CellClass, GridError> {
        let index = self.index(position)?;
        Ok(CellClass::from_code(self.cells[index]))
    }

    /// Whether route search and autonomous replay may enter the cell.
    ///
    /// Only walls block; boosters, hurdles, markers and trail are all walkable.
    pub fn is_traversable(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.classify(position)? != CellClass::Wall)
    }

    /// Whether a manual move may enter the cell.
    ///
    /// Only empty floor qualifies. Unvisited boosters and hurdles, markers and
    /// trail all reject manual moves.
    pub fn is_vacant(&self, position: Position) -> Result<bool, GridError> {
        Ok(self.classify(position)? == CellClass::Empty)
    }

    /// Overwrites the cell with the trail marker, returning its previous class.
    ///
    /// The previous classification is lost for good.
    pub fn mark_visited(&mut self, position: Position) -> Result<CellClass, GridError> {
        let index = self.index(position)?;
        let previous = CellClass::from_code(self.cells[index]);
        self.cells[index] = CellClass::Trail.code();
        Ok(previous)
    }

    /// Marks every cell of the route as trail without evaluating modifiers.
    pub fn mark_route(&mut self, route: &Route) -> Result<(), GridError> {
        for &position in route.positions() {
            let _ = self.mark_visited(position)?;
        }
        Ok(())
    }

    /// Neighbouring position in the direction, if it lies within the grid.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|candidate| self.contains(*candidate))
    }

    /// First cell of the provided class in row-major order.
    #[must_use]
    pub fn locate(&self, class: CellClass) -> Option<Position> {
        let code = class.code();
        let offset = self.cells.iter().position(|&cell| cell == code)?;
        let columns = usize::try_from(self.columns).ok()?;
        let row = u32::try_from(offset / columns).ok()?;
        let column = u32::try_from(offset % columns).ok()?;
        Some(Position::new(row, column))
    }

    /// Iterator over the rows of raw cell codes, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        let width = usize::try_from(self.columns).unwrap_or(usize::MAX).max(1);
        self.cells.chunks(width)
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        let out_of_bounds = || GridError::OutOfBounds {
            position,
            rows: self.rows,
            columns: self.columns,
        };
        if !self.contains(position) {
            return Err(out_of_bounds());
        }

        let row = usize::try_from(position.row()).map_err(|_| out_of_bounds())?;
        let column = usize::try_from(position.column()).map_err(|_| out_of_bounds())?;
        let width = usize::try_from(self.columns).map_err(|_| out_of_bounds())?;
        Ok(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_crawler_core::{Booster, Hurdle};

    fn sample() -> Grid {
        Grid::from_rows(vec![vec![2, 0, 4], vec![1, -6, 0], vec![0, 0, 3]]).expect("valid grid")
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let error = Grid::from_rows(vec![vec![0, 0], vec![0]]).expect_err("ragged rows");
        assert_eq!(
            error,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert_eq!(Grid::from_rows(Vec::new()), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![Vec::new()]), Err(GridError::Empty));
    }

    #[test]
    fn classify_reads_row_major_cells() {
        let grid = sample();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.classify(Position::new(0, 0)), Ok(CellClass::Start));
        assert_eq!(
            grid.classify(Position::new(0, 2)),
            Ok(CellClass::Booster(Booster::Perception))
        );
        assert_eq!(
            grid.classify(Position::new(1, 1)),
            Ok(CellClass::Hurdle(Hurdle::Fog))
        );
        assert_eq!(grid.classify(Position::new(2, 2)), Ok(CellClass::Goal));
    }

    #[test]
    fn access_outside_extents_fails_without_clamping() {
        let mut grid = sample();
        let outside = Position::new(0, 3);
        let expected = GridError::OutOfBounds {
            position: outside,
            rows: 3,
            columns: 3,
        };
        assert_eq!(grid.classify(outside), Err(expected.clone()));
        assert_eq!(grid.mark_visited(outside), Err(expected));
        assert!(grid.is_traversable(Position::new(3, 0)).is_err());
    }

    #[test]
    fn walkability_predicates_stay_asymmetric() {
        let grid = sample();
        let fog = Position::new(1, 1);
        assert_eq!(grid.is_traversable(fog), Ok(true));
        assert_eq!(grid.is_vacant(fog), Ok(false));

        let wall = Position::new(1, 0);
        assert_eq!(grid.is_traversable(wall), Ok(false));
        assert_eq!(grid.is_vacant(wall), Ok(false));

        let floor = Position::new(0, 1);
        assert_eq!(grid.is_traversable(floor), Ok(true));
        assert_eq!(grid.is_vacant(floor), Ok(true));
    }

    #[test]
    fn mark_visited_overwrites_and_reports_previous_class() {
        let mut grid = sample();
        let booster = Position::new(0, 2);
        assert_eq!(
            grid.mark_visited(booster),
            Ok(CellClass::Booster(Booster::Perception))
        );
        assert_eq!(grid.classify(booster), Ok(CellClass::Trail));
        assert_eq!(grid.mark_visited(booster), Ok(CellClass::Trail));
        assert_eq!(grid.is_vacant(booster), Ok(false));
    }

    #[test]
    fn mark_route_trails_every_position() {
        let mut grid = sample();
        let route = Route::from_positions(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ]);
        grid.mark_route(&route).expect("route within grid");
        for position in route.positions() {
            assert_eq!(grid.classify(*position), Ok(CellClass::Trail));
        }
        assert_eq!(grid.classify(Position::new(2, 2)), Ok(CellClass::Goal));
    }

    #[test]
    fn neighbor_respects_both_edges() {
        let grid = sample();
        assert_eq!(grid.neighbor(Position::new(0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor(Position::new(2, 2), Direction::Right), None);
        assert_eq!(
            grid.neighbor(Position::new(1, 1), Direction::Left),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn locate_scans_row_major() {
        let grid = sample();
        assert_eq!(grid.locate(CellClass::Start), Some(Position::new(0, 0)));
        assert_eq!(grid.locate(CellClass::Goal), Some(Position::new(2, 2)));
        assert_eq!(grid.locate(CellClass::Trail), None);
    }

    #[test]
    fn iter_rows_yields_each_row() {
        let grid = sample();
        let rows: Vec<&[i32]> = grid.iter_rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], &[1, -6, 0]);
    }
}
