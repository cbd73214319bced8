//! Maze grid, generation and spawn placement.
//!
//! The maze is a square [`Grid`] of [`CellKind`] values. Walls occupy every even
//! row/column of a freshly generated grid and corridors are carved through the odd
//! ones (see [`generator`]). The grid is also convertible to and from a plain text
//! form, one row per line:
//!
//! ```text
//! #######
//! #     #
//! ### # #
//! #   # #
//! #######
//! ```
//!
//! - `#` is a wall
//! - any other character is a path

pub mod generator;
pub mod spawn;

pub use generator::{Cell, MazeGenerator};
pub use spawn::{SpawnLocator, SpawnSet};

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Wall,
    Path,
}

/// Errors raised when parsing a grid from text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridParseError {
    #[error("maze text is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze must be square, got {width}x{height}")]
    NotSquare { width: usize, height: usize },
}

/// Square matrix of wall/path cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimension: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates a `dimension`×`dimension` grid with every cell set to `kind`.
    pub fn filled(dimension: usize, kind: CellKind) -> Self {
        Self {
            dimension,
            cells: vec![kind; dimension * dimension],
        }
    }

    /// Side length of the grid.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Kind of the cell at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: Cell) -> Option<CellKind> {
        if cell.row < self.dimension && cell.col < self.dimension {
            Some(self.cells[cell.row * self.dimension + cell.col])
        } else {
            None
        }
    }

    pub fn set(&mut self, cell: Cell, kind: CellKind) {
        let index = cell.row * self.dimension + cell.col;
        self.cells[index] = kind;
    }

    /// True when the cell lies inside the grid and is a path.
    pub fn is_path(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellKind::Path)
    }

    /// True for any cell outside the grid as well as for walls.
    pub fn is_wall(&self, cell: Cell) -> bool {
        !self.is_path(cell)
    }

    /// Path test for signed coordinates, used by neighbour lookups.
    pub fn is_path_at(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && self.is_path(Cell::new(row as usize, col as usize))
    }

    /// True when the cell is not on the outer ring.
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.row > 0
            && cell.col > 0
            && cell.row + 1 < self.dimension
            && cell.col + 1 < self.dimension
    }

    /// Iterates over every path cell in row-major order.
    pub fn path_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == CellKind::Path)
            .map(|(index, _)| Cell::new(index / self.dimension, index % self.dimension))
    }

    pub fn path_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|kind| **kind == CellKind::Path)
            .count()
    }

    /// Path neighbours of `cell` in the four axis directions.
    pub fn path_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let (row, col) = (cell.row as isize, cell.col as isize);
        [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
            .into_iter()
            .filter(move |&(r, c)| self.is_path_at(r, c))
            .map(|(r, c)| Cell::new(r as usize, c as usize))
    }

    /// Every path cell reachable from `start` (empty when `start` is a wall).
    pub fn reachable_from(&self, start: Cell) -> Vec<Cell> {
        let mut visited = vec![false; self.cells.len()];
        let mut reached = Vec::new();
        if !self.is_path(start) {
            return reached;
        }

        let mut queue = VecDeque::from([start]);
        visited[start.row * self.dimension + start.col] = true;
        while let Some(current) = queue.pop_front() {
            reached.push(current);
            for next in self.path_neighbors(current) {
                let index = next.row * self.dimension + next.col;
                if !visited[index] {
                    visited[index] = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    /// Shortest path between two path cells, inclusive of both ends.
    pub fn shortest_path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if !self.is_path(from) || !self.is_path(to) {
            return None;
        }

        let mut previous: Vec<Option<Cell>> = vec![None; self.cells.len()];
        let mut queue = VecDeque::from([from]);
        previous[from.row * self.dimension + from.col] = Some(from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                break;
            }
            for next in self.path_neighbors(current) {
                let index = next.row * self.dimension + next.col;
                if previous[index].is_none() {
                    previous[index] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        previous[to.row * self.dimension + to.col]?;

        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = previous[current.row * self.dimension + current.col]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dimension) {
            let line: String = row
                .iter()
                .map(|kind| match kind {
                    CellKind::Wall => '#',
                    CellKind::Path => ' ',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses the `#`/space text form. Trailing blank lines are ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = text
            .lines()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .skip_while(|line| line.trim().is_empty())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        if lines.is_empty() {
            return Err(GridParseError::Empty);
        }

        let width = lines[0].chars().count();
        let mut cells = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            cells.extend(line.chars().map(|c| {
                if c == '#' {
                    CellKind::Wall
                } else {
                    CellKind::Path
                }
            }));
        }

        if width != lines.len() {
            return Err(GridParseError::NotSquare {
                width,
                height: lines.len(),
            });
        }

        Ok(Self {
            dimension: width,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "#####\n#   #\n### #\n#   #\n#####\n";

    #[test]
    fn test_parse_and_display_agree() {
        let grid: Grid = SMALL.parse().unwrap();
        assert_eq!(grid.dimension(), 5);
        assert_eq!(grid.to_string(), SMALL);
        assert_eq!(grid.path_count(), 7);
    }

    #[test]
    fn test_parse_rejects_ragged_and_rectangular_input() {
        assert_eq!(
            "###\n# \n###".parse::<Grid>(),
            Err(GridParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "####\n####".parse::<Grid>(),
            Err(GridParseError::NotSquare {
                width: 4,
                height: 2
            })
        );
        assert_eq!("\n\n".parse::<Grid>(), Err(GridParseError::Empty));
    }

    #[test]
    fn test_shortest_path_follows_corridor() {
        let grid: Grid = SMALL.parse().unwrap();
        let path = grid
            .shortest_path(Cell::new(1, 1), Cell::new(3, 1))
            .unwrap();
        assert_eq!(path.first(), Some(&Cell::new(1, 1)));
        assert_eq!(path.last(), Some(&Cell::new(3, 1)));
        // 1,1 -> 1,3 -> 3,3 -> 3,1
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|cell| grid.is_path(*cell)));
    }

    #[test]
    fn test_out_of_bounds_cells_are_walls() {
        let grid: Grid = SMALL.parse().unwrap();
        assert!(grid.is_wall(Cell::new(10, 1)));
        assert!(!grid.is_path_at(-1, 2));
        assert_eq!(grid.get(Cell::new(5, 0)), None);
    }
}
