//! Box overlap tests and trigger tracking.
//!
//! # Overview
//!
//! Everything that collides in the game is approximated by an axis-aligned box:
//! the player, the goal trigger, the monster and its projectiles. Walls are the grid
//! cells themselves, so blocking movement only needs the cells under a box's
//! footprint.
//!
//! # Core Components
//!
//! * [`AABB`] - Axis-Aligned Bounding Box, the fundamental collision primitive
//! * [`blocked_by_walls`] - Whether a box footprint touches any wall cell
//! * [`TriggerTracker`] - Turns per-frame overlap results into enter events

use crate::maze::{Cell, Grid};
use crate::math::Vec3;
use crate::renderer::EntityId;
use std::collections::HashSet;

/// World-axis box around an entity, stored as its lowest and highest corners.
///
/// Players, goals, monsters and projectiles each get one per frame. Trigger checks
/// compare two of them; wall checks only look at the x/z footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl AABB {
    /// Box spanning `min` to `max`. Corners are taken as given, not sorted.
    ///
    /// # Example
    /// ```
    /// use cubemaze::game::collision::AABB;
    ///
    /// let bbox = AABB::new([0.0, 0.0, 0.0], [1.0, 2.0, 3.0]);
    /// assert_eq!(bbox.center(), [0.5, 1.0, 1.5]);
    /// ```
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` reaching `half_extents` along each axis.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: (center - half_extents).into(),
            max: (center + half_extents).into(),
        }
    }

    /// Box of an entity drawn with the given `scale` around `position`.
    pub fn from_scale(position: Vec3, scale: Vec3) -> Self {
        Self::from_center(position, scale * 0.5)
    }

    /// Overlap on every axis. A projectile grazing the player's face counts as a
    /// hit, and so does a player touching the goal volume.
    pub fn intersects(&self, other: &AABB) -> bool {
        for i in 0..3 {
            if self.max[i] < other.min[i] || self.min[i] > other.max[i] {
                return false;
            }
        }
        true
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }
}

/// Grid cell containing a world position, if it lies on the maze.
pub fn world_to_cell(x: f32, z: f32, dimension: usize, cell_size: f32) -> Option<Cell> {
    let half = dimension as f32 / 2.0;
    let col = (x / cell_size + half).floor();
    let row = (z / cell_size + half).floor();
    if col < 0.0 || row < 0.0 || col >= dimension as f32 || row >= dimension as f32 {
        return None;
    }
    Some(Cell::new(row as usize, col as usize))
}

/// True when the horizontal footprint of `bounds` overlaps a wall cell or leaves the
/// maze. Height is ignored: walls always reach above anything walking the paths.
pub fn blocked_by_walls(grid: &Grid, cell_size: f32, bounds: &AABB) -> bool {
    let d = grid.dimension();
    // shrink by a hair so a box resting exactly on a cell edge does not touch the
    // neighbour
    let eps = 1e-4;
    let corners = [
        (bounds.min[0] + eps, bounds.min[2] + eps),
        (bounds.max[0] - eps, bounds.max[2] - eps),
    ];
    let (Some(lo), Some(hi)) = (
        world_to_cell(corners[0].0, corners[0].1, d, cell_size),
        world_to_cell(corners[1].0, corners[1].1, d, cell_size),
    ) else {
        return true;
    };

    (lo.row..=hi.row).any(|row| (lo.col..=hi.col).any(|col| grid.is_wall(Cell::new(row, col))))
}

/// Remembers which (trigger, other) pairs overlapped last frame so that only the
/// first frame of an overlap is reported.
#[derive(Debug, Default)]
pub struct TriggerTracker {
    inside: HashSet<(EntityId, EntityId)>,
}

impl TriggerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this frame's overlap state and returns `true` only on the frame the
    /// overlap begins.
    pub fn observe(&mut self, trigger: EntityId, other: EntityId, overlapping: bool) -> bool {
        if overlapping {
            self.inside.insert((trigger, other))
        } else {
            self.inside.remove(&(trigger, other));
            false
        }
    }

    pub fn clear(&mut self) {
        self.inside.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::CellKind;

    #[test]
    fn test_intersects_on_all_axes_only() {
        let a = AABB::from_center(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5));
        let b = AABB::from_center(Vec3::new(0.9, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        let c = AABB::from_center(Vec3::new(0.9, 2.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_world_to_cell_inverts_cell_centres() {
        // D = 5, cell 2: cell (row 1, col 3) centre is at x = 2, z = -2
        assert_eq!(world_to_cell(2.0, -2.0, 5, 2.0), Some(Cell::new(1, 3)));
        assert_eq!(world_to_cell(-5.1, 0.0, 5, 2.0), None);
    }

    #[test]
    fn test_blocked_by_walls() {
        let mut grid = Grid::filled(3, CellKind::Wall);
        grid.set(Cell::new(1, 1), CellKind::Path);
        let half = Vec3::new(0.4, 1.0, 0.4);

        let centred = AABB::from_center(Vec3::ZERO, half);
        assert!(!blocked_by_walls(&grid, 1.0, &centred));

        let nudged = AABB::from_center(Vec3::new(0.2, 0.0, 0.0), half);
        assert!(blocked_by_walls(&grid, 1.0, &nudged));

        let outside = AABB::from_center(Vec3::new(10.0, 0.0, 0.0), half);
        assert!(blocked_by_walls(&grid, 1.0, &outside));
    }

    #[test]
    fn test_trigger_reports_enter_once() {
        let mut tracker = TriggerTracker::new();
        let (goal, player) = (EntityId(1), EntityId(2));
        assert!(!tracker.observe(goal, player, false));
        assert!(tracker.observe(goal, player, true));
        assert!(!tracker.observe(goal, player, true));
        assert!(!tracker.observe(goal, player, false));
        assert!(tracker.observe(goal, player, true));
    }
}
