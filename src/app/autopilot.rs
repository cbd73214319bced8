//! Scripted steering that walks the player to the goal.

use crate::game::player::{MoveIntent, Player};
use crate::math::{Vec3, yaw_of};
use crate::maze::spawn::grid_to_world;
use crate::maze::{Cell, Grid};

/// Smallest arrival radius, for very short frames.
const MIN_ARRIVAL: f32 = 0.05;

/// Walks the player along the shortest path to the goal.
///
/// Each frame it turns the player toward the next cell centre and pushes forward.
/// Once a centre is within one frame's step the player is put exactly on it, which
/// keeps the collider centred in one-cell corridors so corners never snag.
#[derive(Debug, Default)]
pub struct Autopilot {
    waypoints: Vec<Vec3>,
    next: usize,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans a route from `from` to `to`. Returns false if the goal is unreachable,
    /// in which case the autopilot stands still.
    pub fn plan(&mut self, grid: &Grid, from: Cell, to: Cell, cell_size: f32, y: f32) -> bool {
        self.next = 0;
        self.waypoints.clear();

        let Some(path) = grid.shortest_path(from, to) else {
            log::warn!("No route from {:?} to {:?}", from, to);
            return false;
        };
        self.waypoints = path
            .into_iter()
            .map(|cell| grid_to_world(cell, grid.dimension(), cell_size, y))
            .collect();
        log::debug!("Autopilot route: {} cells", self.waypoints.len());
        true
    }

    /// Waypoints not reached yet.
    pub fn remaining(&self) -> usize {
        self.waypoints.len() - self.next
    }

    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }

    /// Sets the player's yaw and intent for this frame.
    pub fn steer(&mut self, player: &mut Player, dt: f32) {
        let movement = &mut player.movement;
        let arrival = (movement.speed * dt).max(MIN_ARRIVAL);

        while let Some(&target) = self.waypoints.get(self.next) {
            let delta = (target - movement.position).horizontal();
            if delta.length() > arrival {
                movement.yaw = yaw_of(delta);
                movement.intent = MoveIntent {
                    forward: 1.0,
                    strafe: 0.0,
                };
                return;
            }
            movement.position = target.with_y(movement.position.y());
            self.next += 1;
        }

        movement.intent = MoveIntent::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::entity::{FrameContext, Updatable};
    use crate::renderer::EntityId;

    const MAZE: &str = "\
#####
#   #
### #
#   #
#####";

    #[test]
    fn test_walks_the_maze_to_the_goal() {
        let grid: Grid = MAZE.parse().unwrap();
        let config = GameConfig::new();
        let from = Cell::new(1, 1);
        let to = Cell::new(3, 1);
        let start = grid_to_world(from, 5, 1.0, 0.5);
        let goal = grid_to_world(to, 5, 1.0, 0.5);
        let mut player = Player::new(EntityId(1), start, &config);

        let mut autopilot = Autopilot::new();
        assert!(autopilot.plan(&grid, from, to, 1.0, 0.5));
        assert_eq!(autopilot.remaining(), 7);

        let dt = 1.0 / 60.0;
        for _ in 0..600 {
            autopilot.steer(&mut player, dt);
            if autopilot.is_done() {
                break;
            }
            let mut ctx = FrameContext::new(dt, &grid, None);
            player.update(&mut ctx);
        }

        assert!(autopilot.is_done());
        assert_eq!(player.position(), goal);
        assert!(player.movement.intent.is_idle());
    }

    #[test]
    fn test_unreachable_goal_stands_still() {
        let grid: Grid = "#####\n# # #\n#####\n#####\n#####".parse().unwrap();
        let config = GameConfig::new();
        let start = grid_to_world(Cell::new(1, 1), 5, 1.0, 0.5);
        let mut player = Player::new(EntityId(1), start, &config);

        let mut autopilot = Autopilot::new();
        assert!(!autopilot.plan(&grid, Cell::new(1, 1), Cell::new(1, 3), 1.0, 0.5));
        autopilot.steer(&mut player, 0.1);
        assert!(player.movement.intent.is_idle());
        assert_eq!(player.position(), start);
    }
}
