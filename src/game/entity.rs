//! Capabilities shared by gameplay entities.
//!
//! Entities never reach into the game or the scene directly. During a frame they read
//! what they need from a [`FrameContext`] and queue [`Command`]s for anything that
//! affects other entities or the scene; the game applies the queue once every entity
//! has been updated.

use super::collision::AABB;
use crate::maze::Grid;
use crate::math::Vec3;
use crate::renderer::EntityId;

/// What entities may know about the player during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Vec3,
    pub bounds: AABB,
}

/// A projectile the monster wants fired this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunch {
    pub origin: Vec3,
    /// Horizontal unit direction of travel.
    pub direction: Vec3,
}

/// Side effects queued by entities during a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SpawnProjectile(ProjectileLaunch),
    DamagePlayer(u32),
    Recolor { id: EntityId, color: [u8; 4] },
}

/// Per-frame inputs plus the command queue.
pub struct FrameContext<'a> {
    pub dt: f32,
    pub grid: &'a Grid,
    /// Present only when the player exists and is enabled.
    pub player: Option<PlayerView>,
    pub commands: Vec<Command>,
}

impl<'a> FrameContext<'a> {
    pub fn new(dt: f32, grid: &'a Grid, player: Option<PlayerView>) -> Self {
        Self {
            dt,
            grid,
            player,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Something that advances once per frame while the game is playing.
pub trait Updatable {
    fn update(&mut self, ctx: &mut FrameContext<'_>);
}

/// An overlap between a trigger volume and another entity began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub trigger: EntityId,
    pub other: EntityId,
}

/// Game-level outcomes a trigger can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GoalReached,
}

/// Reacts to entities entering a trigger volume.
pub trait TriggerListener {
    /// `player` is the current player's id, if one exists.
    fn on_trigger_enter(&mut self, other: EntityId, player: Option<EntityId>) -> Option<GameEvent>;
}
