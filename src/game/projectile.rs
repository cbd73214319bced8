use super::collision::AABB;
use super::entity::{Command, FrameContext, ProjectileLaunch, Updatable};
use crate::config::GameConfig;
use crate::math::Vec3;
use crate::renderer::EntityId;

/// A monster shot: flies in a straight line until it hits the player or expires.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub enabled: bool,
    position: Vec3,
    direction: Vec3,
    speed: f32,
    lifetime: f32,
    damage: u32,
    scale: Vec3,
    alive: bool,
}

impl Projectile {
    pub fn scale(config: &GameConfig) -> Vec3 {
        let s = config.monster.projectile_scale;
        Vec3::new(s, s, s)
    }

    /// Where a launch actually starts: its origin, floating just above the path.
    pub fn place(launch: &ProjectileLaunch, config: &GameConfig) -> Vec3 {
        launch
            .origin
            .with_y(config.maze.path_height + Self::scale(config).y() / 2.0)
    }

    pub fn new(id: EntityId, launch: ProjectileLaunch, config: &GameConfig) -> Self {
        Self {
            id,
            enabled: true,
            position: Self::place(&launch, config),
            direction: launch.direction.normalize(),
            speed: config.monster.projectile_speed,
            lifetime: config.monster.projectile_lifetime,
            damage: config.monster.attack_damage,
            scale: Self::scale(config),
            alive: true,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_scale(self.position, self.scale)
    }

    /// False once the projectile hit something or ran out of time.
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Updatable for Projectile {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.alive {
            return;
        }

        self.position += self.direction * (self.speed * ctx.dt);
        self.lifetime -= ctx.dt;

        if let Some(player) = ctx.player {
            if self.bounds().intersects(&player.bounds) {
                ctx.push(Command::DamagePlayer(self.damage));
                self.alive = false;
                return;
            }
        }

        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }
}
