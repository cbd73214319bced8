use super::collision::AABB;
use super::entity::{GameEvent, TriggerListener};
use crate::config::GameConfig;
use crate::math::Vec3;
use crate::renderer::EntityId;

/// Trigger volume the player has to reach.
#[derive(Debug, Clone)]
pub struct Goal {
    pub id: EntityId,
    pub enabled: bool,
    position: Vec3,
    scale: Vec3,
}

impl Goal {
    pub fn scale(config: &GameConfig) -> Vec3 {
        Vec3::new(
            config.maze.cell_size * 0.8,
            config.maze.wall_height * 1.5,
            config.maze.cell_size * 0.8,
        )
    }

    /// Raises a spawn position so the box sits on the path.
    pub fn place(spawn: Vec3, config: &GameConfig) -> Vec3 {
        spawn.with_y(spawn.y() + config.maze.path_height + Self::scale(config).y() / 2.0)
    }

    pub fn new(id: EntityId, position: Vec3, config: &GameConfig) -> Self {
        Self {
            id,
            enabled: true,
            position,
            scale: Self::scale(config),
        }
    }

    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.enabled = true;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_scale(self.position, self.scale)
    }
}

impl TriggerListener for Goal {
    fn on_trigger_enter(&mut self, other: EntityId, player: Option<EntityId>) -> Option<GameEvent> {
        (self.enabled && Some(other) == player).then_some(GameEvent::GoalReached)
    }
}
