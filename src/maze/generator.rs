//! Maze generation by recursive backtracking.
//!
//! Corridors are carved two cells at a time from a random odd start cell, so walls end
//! up on the even rows/columns and the outer ring is never touched. The walk keeps an
//! explicit stack of frames instead of recursing, but draws random numbers in the same
//! order a recursive carve would: directions are shuffled once on entering a cell, then
//! tried in that order, descending immediately into the first that is still uncarved.
//!
//! # Examples
//!
//! ```rust
//! use cubemaze::maze::{Cell, MazeGenerator};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let grid = MazeGenerator::generate(&mut rng, 10);
//!
//! assert_eq!(grid.dimension(), 11);
//! assert!(grid.is_wall(Cell::new(0, 0)));
//! ```

use super::{CellKind, Grid};
use crate::config::normalize_dimension;
use rand::Rng;
use rand::seq::SliceRandom;

/// Represents a cell in the maze grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index of the cell (the z axis in world space)
    pub row: usize,
    /// Column index of the cell (the x axis in world space)
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Carving directions as `(dx, dz)`, i.e. `(column step, row step)`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// One cell on the carving stack with its shuffled directions and how many were tried.
struct Frame {
    cell: Cell,
    directions: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(grid: &mut Grid, cell: Cell, rng: &mut R) -> Self {
        grid.set(cell, CellKind::Path);
        let mut directions = DIRECTIONS;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Produces perfect mazes: every path cell reachable, no loops.
pub struct MazeGenerator;

impl MazeGenerator {
    /// Generates a maze of side `dimension`, normalised to an odd value of at least 3.
    ///
    /// All cells start as walls. The start cell is `randrange(D/2) * 2 + 1` on each
    /// axis, x first. A neighbour two steps away is carved into when it lies strictly
    /// inside the outer ring and is still a wall; the cell between is opened as well.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, dimension: usize) -> Grid {
        let dimension = normalize_dimension(dimension);
        let mut grid = Grid::filled(dimension, CellKind::Wall);

        let start_x = rng.gen_range(0..dimension / 2) * 2 + 1;
        let start_z = rng.gen_range(0..dimension / 2) * 2 + 1;

        let mut stack = vec![Frame::enter(&mut grid, Cell::new(start_z, start_x), rng)];

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.directions.len() {
                stack.pop();
                continue;
            }

            let (dx, dz) = frame.directions[frame.next];
            frame.next += 1;
            let from = frame.cell;

            let nx = from.col as isize + dx * 2;
            let nz = from.row as isize + dz * 2;
            let limit = dimension as isize - 1;
            if nx <= 0 || nx >= limit || nz <= 0 || nz >= limit {
                continue;
            }

            let far = Cell::new(nz as usize, nx as usize);
            if grid.get(far) != Some(CellKind::Wall) {
                continue;
            }

            let between = Cell::new(
                (from.row as isize + dz) as usize,
                (from.col as isize + dx) as usize,
            );
            grid.set(between, CellKind::Path);
            stack.push(Frame::enter(&mut grid, far, rng));
        }

        log::debug!(
            "generated {}x{} maze with {} path cells",
            dimension,
            dimension,
            grid.path_count()
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Number of orthogonally adjacent path pairs.
    fn path_edges(grid: &Grid) -> usize {
        grid.path_cells()
            .map(|cell| {
                let right = grid.is_path(Cell::new(cell.row, cell.col + 1)) as usize;
                let down = grid.is_path(Cell::new(cell.row + 1, cell.col)) as usize;
                right + down
            })
            .sum()
    }

    fn has_open_square(grid: &Grid) -> bool {
        let d = grid.dimension();
        (0..d - 1).any(|row| {
            (0..d - 1).any(|col| {
                grid.is_path(Cell::new(row, col))
                    && grid.is_path(Cell::new(row + 1, col))
                    && grid.is_path(Cell::new(row, col + 1))
                    && grid.is_path(Cell::new(row + 1, col + 1))
            })
        })
    }

    #[test]
    fn test_dimension_is_normalised() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(MazeGenerator::generate(&mut rng, 0).dimension(), 3);
        assert_eq!(MazeGenerator::generate(&mut rng, 4).dimension(), 5);
        assert_eq!(MazeGenerator::generate(&mut rng, 9).dimension(), 9);
    }

    /// The smallest maze has exactly one open cell, in the middle.
    #[test]
    fn test_three_by_three_opens_centre_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = MazeGenerator::generate(&mut rng, 3);
        assert_eq!(grid.path_count(), 1);
        assert!(grid.is_path(Cell::new(1, 1)));
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = MazeGenerator::generate(&mut StdRng::seed_from_u64(42), 21);
        let b = MazeGenerator::generate(&mut StdRng::seed_from_u64(42), 21);
        assert_eq!(a, b);
    }

    /// Every odd/odd cell is a room and is carved.
    #[test]
    fn test_all_rooms_are_open() {
        let grid = MazeGenerator::generate(&mut StdRng::seed_from_u64(9), 11);
        for row in (1..11).step_by(2) {
            for col in (1..11).step_by(2) {
                assert!(grid.is_path(Cell::new(row, col)), "room {},{}", row, col);
            }
        }
        // even/even cells are pillars and stay solid
        for row in (0..11).step_by(2) {
            for col in (0..11).step_by(2) {
                assert!(grid.is_wall(Cell::new(row, col)));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_generated_maze_is_perfect(seed in any::<u64>(), half in 1usize..15) {
            let dimension = half * 2 + 1;
            let grid = MazeGenerator::generate(&mut StdRng::seed_from_u64(seed), dimension);
            let d = grid.dimension();

            for i in 0..d {
                prop_assert!(grid.is_wall(Cell::new(0, i)));
                prop_assert!(grid.is_wall(Cell::new(d - 1, i)));
                prop_assert!(grid.is_wall(Cell::new(i, 0)));
                prop_assert!(grid.is_wall(Cell::new(i, d - 1)));
            }

            let paths = grid.path_count();
            let start = grid.path_cells().next().unwrap();
            prop_assert_eq!(grid.reachable_from(start).len(), paths);
            prop_assert_eq!(path_edges(&grid), paths - 1);
            prop_assert!(!has_open_square(&grid));
        }
    }
}
