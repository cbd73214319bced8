//! Spawn placement for the player, goal and monster.
//!
//! The player starts at the first open cell in reading order and the goal at the last,
//! which puts them in opposite corners of a generated maze. The monster is dropped at a
//! random open cell far enough from both.

use super::{Cell, Grid};
use crate::math::Vec3;
use rand::Rng;

/// How many random cells are tried before the monster falls back to the centre.
const MONSTER_SPAWN_ATTEMPTS: usize = 100;

/// Cells chosen for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSet {
    pub player: Cell,
    pub goal: Cell,
    pub monster: Cell,
}

/// Read-only spawn queries over a grid.
pub struct SpawnLocator<'a> {
    grid: &'a Grid,
}

impl<'a> SpawnLocator<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// First path cell scanning interior rows top to bottom, columns left to right.
    /// Falls back to `(1, 1)` when the interior has no path.
    pub fn find_spawn(&self) -> Cell {
        let d = self.grid.dimension();
        (1..d.saturating_sub(1))
            .flat_map(|row| (1..d - 1).map(move |col| Cell::new(row, col)))
            .find(|cell| self.grid.is_path(*cell))
            .unwrap_or(Cell::new(1, 1))
    }

    /// Last path cell in the same scan, i.e. the first one scanning in reverse.
    /// Falls back to `(D-2, D-2)`.
    pub fn find_goal(&self) -> Cell {
        let d = self.grid.dimension();
        (1..d.saturating_sub(1))
            .rev()
            .flat_map(|row| (1..d - 1).rev().map(move |col| Cell::new(row, col)))
            .find(|cell| self.grid.is_path(*cell))
            .unwrap_or(Cell::new(d.saturating_sub(2), d.saturating_sub(2)))
    }

    /// Random path cell whose Manhattan distance to both `spawn` and `goal` exceeds `D/4`.
    ///
    /// After [`MONSTER_SPAWN_ATTEMPTS`] misses this returns the grid centre without
    /// checking it, which may be a wall on some grids.
    pub fn find_monster_spawn<R: Rng + ?Sized>(&self, rng: &mut R, spawn: Cell, goal: Cell) -> Cell {
        let d = self.grid.dimension();
        let min_distance = d as f32 / 4.0;

        for _ in 0..MONSTER_SPAWN_ATTEMPTS {
            let row = rng.gen_range(1..=d - 2);
            let col = rng.gen_range(1..=d - 2);
            let candidate = Cell::new(row, col);

            if self.grid.is_path(candidate)
                && candidate.manhattan(spawn) as f32 > min_distance
                && candidate.manhattan(goal) as f32 > min_distance
            {
                return candidate;
            }
        }

        let centre = Cell::new(d / 2, d / 2);
        log::warn!(
            "no monster spawn found in {} attempts, using centre {:?}",
            MONSTER_SPAWN_ATTEMPTS,
            centre
        );
        centre
    }

    /// Runs the three searches in order: spawn, goal, then monster.
    pub fn locate<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSet {
        let player = self.find_spawn();
        let goal = self.find_goal();
        let monster = self.find_monster_spawn(rng, player, goal);
        SpawnSet {
            player,
            goal,
            monster,
        }
    }
}

/// World position of a cell centre. The maze is centred on the origin, columns run
/// along x and rows along z.
pub fn grid_to_world(cell: Cell, dimension: usize, cell_size: f32, y: f32) -> Vec3 {
    let half = dimension as f32 / 2.0;
    Vec3::new(
        (cell.col as f32 - half + 0.5) * cell_size,
        y,
        (cell.row as f32 - half + 0.5) * cell_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{CellKind, MazeGenerator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_and_goal_are_paths_in_opposite_corners() {
        for seed in 0..20 {
            let grid = MazeGenerator::generate(&mut StdRng::seed_from_u64(seed), 15);
            let locator = SpawnLocator::new(&grid);
            let spawn = locator.find_spawn();
            let goal = locator.find_goal();
            assert!(grid.is_path(spawn));
            assert!(grid.is_path(goal));
            assert_eq!(spawn, Cell::new(1, 1));
            assert_eq!(goal, Cell::new(13, 13));
        }
    }

    #[test]
    fn test_fallbacks_on_solid_grid() {
        let grid = Grid::filled(7, CellKind::Wall);
        let locator = SpawnLocator::new(&grid);
        assert_eq!(locator.find_spawn(), Cell::new(1, 1));
        assert_eq!(locator.find_goal(), Cell::new(5, 5));

        let monster =
            locator.find_monster_spawn(&mut StdRng::seed_from_u64(0), Cell::new(1, 1), Cell::new(5, 5));
        assert_eq!(monster, Cell::new(3, 3));
    }

    #[test]
    fn test_monster_keeps_its_distance() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = MazeGenerator::generate(&mut rng, 21);
            let spawns = SpawnLocator::new(&grid).locate(&mut rng);
            let centre = Cell::new(10, 10);
            if spawns.monster != centre {
                assert!(grid.is_path(spawns.monster));
                assert!(spawns.monster.manhattan(spawns.player) as f32 > 21.0 / 4.0);
                assert!(spawns.monster.manhattan(spawns.goal) as f32 > 21.0 / 4.0);
            }
        }
    }

    #[test]
    fn test_grid_to_world_centres_maze_on_origin() {
        let centre = grid_to_world(Cell::new(3, 3), 7, 2.0, 0.5);
        assert_eq!(centre, Vec3::new(0.0, 0.5, 0.0));

        let corner = grid_to_world(Cell::new(0, 6), 7, 1.0, 0.0);
        assert_eq!(corner, Vec3::new(3.0, 0.0, -3.0));
    }
}
