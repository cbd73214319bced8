//! Player entity: movement through the maze plus health.
//!
//! The [`Player`] is assembled from two components rather than one large struct:
//!
//! - [`Movement`] owns position, facing and the current movement intent, and moves
//!   the player each frame while keeping its collider out of wall cells.
//! - [`Health`] owns hit points and the post-hit invulnerability window.
//!
//! # Examples
//!
//! ```rust
//! use cubemaze::game::player::{Damage, Health};
//!
//! let mut health = Health::new(3, 1.0);
//! assert_eq!(health.take_damage(1), Damage::Hurt { remaining: 2 });
//! // still invulnerable from the first hit
//! assert_eq!(health.take_damage(1), Damage::Ignored);
//! ```

use super::collision::{AABB, blocked_by_walls};
use super::entity::{FrameContext, PlayerView, Updatable};
use crate::config::GameConfig;
use crate::maze::Grid;
use crate::math::{Vec3, direction_of_yaw};
use crate::renderer::EntityId;

/// Requested movement for the current frame, each axis in `[-1, 1]`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    /// Positive moves along the facing direction.
    pub forward: f32,
    /// Positive moves to the player's right.
    pub strafe: f32,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0
    }
}

/// Position, facing and wall-aware movement.
#[derive(Debug, Clone)]
pub struct Movement {
    /// Player's world position `[x, y, z]`; `y` stays at the spawn height.
    pub position: Vec3,

    /// Yaw angle in degrees about the vertical axis.
    ///
    /// - 0°: Facing +z
    /// - 90°: Facing +x
    pub yaw: f32,

    /// Movement speed in units per second.
    pub speed: f32,

    pub intent: MoveIntent,

    half_extents: Vec3,
    cell_size: f32,
}

impl Movement {
    pub fn new(position: Vec3, speed: f32, half_extents: Vec3, cell_size: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            speed,
            intent: MoveIntent::default(),
            half_extents,
            cell_size,
        }
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_center(self.position, self.half_extents)
    }

    /// Moves according to the current intent.
    ///
    /// The x and z components are applied one after the other and each is dropped if
    /// it would push the collider into a wall, so a diagonal push against a wall
    /// slides along it instead of stopping dead.
    pub fn integrate(&mut self, dt: f32, grid: &Grid) {
        if self.intent.is_idle() {
            return;
        }

        let direction = (direction_of_yaw(self.yaw) * self.intent.forward
            + direction_of_yaw(self.yaw + 90.0) * self.intent.strafe)
            .normalize();
        let step = direction * (self.speed * dt);

        for offset in [Vec3::new(step.x(), 0.0, 0.0), Vec3::new(0.0, 0.0, step.z())] {
            if offset.is_zero() {
                continue;
            }
            let moved = self.position + offset;
            let bounds = AABB::from_center(moved, self.half_extents);
            if !blocked_by_walls(grid, self.cell_size, &bounds) {
                self.position = moved;
            }
        }
    }
}

/// Result of a damage attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    /// The player was invulnerable.
    Ignored,
    Hurt { remaining: u32 },
    Killed,
}

/// Hit points with a post-hit invulnerability window.
#[derive(Debug, Clone)]
pub struct Health {
    current: u32,
    max: u32,
    invulnerable_for: f32,
    invulnerability_time: f32,
}

impl Health {
    pub fn new(max: u32, invulnerability_time: f32) -> Self {
        Self {
            current: max,
            max,
            invulnerable_for: 0.0,
            invulnerability_time,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    /// Applies damage unless invulnerable. Health saturates at zero; a hit that leaves
    /// the player alive starts the invulnerability window.
    pub fn take_damage(&mut self, amount: u32) -> Damage {
        if self.is_invulnerable() {
            return Damage::Ignored;
        }

        self.current = self.current.saturating_sub(amount);
        log::info!(
            "Player took {} damage. Health: {}/{}",
            amount,
            self.current,
            self.max
        );

        if self.current == 0 {
            Damage::Killed
        } else {
            self.invulnerable_for = self.invulnerability_time;
            Damage::Hurt {
                remaining: self.current,
            }
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.invulnerable_for > 0.0 {
            self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
        }
    }

    /// Blink state while invulnerable: hidden on every other tenth of a second.
    pub fn visible(&self) -> bool {
        !(self.is_invulnerable() && ((self.invulnerable_for * 10.0) as i32) % 2 == 0)
    }

    pub fn reset(&mut self) {
        self.current = self.max;
        self.invulnerable_for = 0.0;
    }
}

/// The player-controlled entity.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub enabled: bool,
    pub movement: Movement,
    pub health: Health,
    start: Vec3,
}

impl Player {
    pub fn new(id: EntityId, start: Vec3, config: &GameConfig) -> Self {
        Self {
            id,
            enabled: true,
            movement: Movement::new(
                start,
                config.player.speed,
                config.player.collider_half_extents.into(),
                config.maze.cell_size,
            ),
            health: Health::new(config.player.max_health, config.player.invulnerability_time),
            start,
        }
    }

    /// Moves back to `start` (which becomes the new start), faces +z, restores full
    /// health and clears any movement intent.
    pub fn reset(&mut self, start: Vec3) {
        self.start = start;
        self.movement.position = start;
        self.movement.yaw = 0.0;
        self.movement.intent = MoveIntent::default();
        self.health.reset();
        self.enabled = true;
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn position(&self) -> Vec3 {
        self.movement.position
    }

    pub fn bounds(&self) -> AABB {
        self.movement.bounds()
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            position: self.position(),
            bounds: self.bounds(),
        }
    }

    pub fn take_damage(&mut self, amount: u32) -> Damage {
        self.health.take_damage(amount)
    }

    pub fn visible(&self) -> bool {
        self.health.visible()
    }
}

impl Updatable for Player {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.health.tick(ctx.dt);
        self.movement.integrate(ctx.dt, ctx.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cell, CellKind};

    /// Straight corridor along +z through the middle column of a 5x5 grid.
    fn corridor() -> Grid {
        let mut grid = Grid::filled(5, CellKind::Wall);
        for row in 1..4 {
            grid.set(Cell::new(row, 2), CellKind::Path);
        }
        grid
    }

    fn player() -> Player {
        Player::new(EntityId(1), Vec3::new(0.0, 0.5, -1.0), &GameConfig::new())
    }

    #[test]
    fn test_hits_inside_invulnerability_window_are_ignored() {
        let mut health = Health::new(3, 1.0);
        assert_eq!(health.take_damage(1), Damage::Hurt { remaining: 2 });
        health.tick(0.5);
        assert_eq!(health.take_damage(1), Damage::Ignored);
        assert_eq!(health.current(), 2);

        health.tick(0.6);
        assert!(!health.is_invulnerable());
        assert_eq!(health.take_damage(1), Damage::Hurt { remaining: 1 });
    }

    #[test]
    fn test_health_saturates_and_kills() {
        let mut health = Health::new(3, 1.0);
        assert_eq!(health.take_damage(10), Damage::Killed);
        assert_eq!(health.current(), 0);
        health.reset();
        assert_eq!(health.current(), 3);
        assert!(!health.is_invulnerable());
    }

    #[test]
    fn test_blink_only_while_invulnerable() {
        let mut health = Health::new(3, 1.0);
        assert!(health.visible());
        health.take_damage(1);
        // timer 1.0 -> (10 as i32) % 2 == 0 -> hidden
        assert!(!health.visible());
        health.tick(0.25);
        // timer 0.75 -> 7 -> shown
        assert!(health.visible());
    }

    #[test]
    fn test_walks_down_corridor() {
        let grid = corridor();
        let mut player = player();
        player.movement.intent.forward = 1.0;

        let mut ctx = FrameContext::new(0.1, &grid, None);
        player.update(&mut ctx);
        assert!((player.position().z() - (-0.2)).abs() < 1e-4);
        assert_eq!(player.position().x(), 0.0);
    }

    #[test]
    fn test_walls_block_and_slide() {
        let grid = corridor();
        let mut player = player();
        player.movement.intent.strafe = 1.0;

        let mut ctx = FrameContext::new(0.1, &grid, None);
        player.update(&mut ctx);
        assert_eq!(player.position(), Vec3::new(0.0, 0.5, -1.0));

        // diagonal into the wall keeps the forward component
        player.movement.intent.forward = 1.0;
        player.update(&mut ctx);
        assert_eq!(player.position().x(), 0.0);
        assert!(player.position().z() > -1.0);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut player = player();
        player.movement.position = Vec3::new(3.0, 0.5, 3.0);
        player.movement.yaw = 45.0;
        player.take_damage(1);
        player.enabled = false;

        player.reset(Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(player.position(), Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(player.start(), Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(player.movement.yaw, 0.0);
        assert_eq!(player.health.current(), 3);
        assert!(player.enabled);
    }
}
