//! The monster: patrols, chases the player on sight and fires projectiles.
//!
//! Each frame the monster picks exactly one behaviour, in priority order:
//!
//! 1. Finish an attack windup (firing when it runs out).
//! 2. Start a windup if the player is in range and the cooldown has expired.
//! 3. Chase the player if in range.
//! 4. Patrol.
//!
//! Movement carries on while the attack cools down; the state reads `Cooling` with the
//! time left until the cooldown runs out.

use super::entity::{Command, FrameContext, ProjectileLaunch, Updatable};
use crate::config::{GameConfig, MonsterConfig, PatrolMode};
use crate::math::{Vec3, yaw_of};
use crate::renderer::EntityId;
use std::mem;

/// Patrol targets closer than this count as reached.
const PATROL_ARRIVAL_DISTANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonsterState {
    Patrolling,
    Chasing,
    /// Telegraphing an attack at `target`, captured when the windup started.
    WindingUp { remaining: f32, target: Vec3 },
    /// Chasing or patrolling after an attack; holds the seconds left.
    Cooling(f32),
}

#[derive(Debug, Clone)]
pub struct Monster {
    pub id: EntityId,
    pub enabled: bool,
    position: Vec3,
    /// Horizontal unit vector the monster faces.
    facing: Vec3,
    start: Vec3,
    patrol_x: f32,
    patrol_phase: f32,
    patrol_target: Option<Vec3>,
    cooldown: f32,
    state: MonsterState,
    scale: Vec3,
    settings: MonsterConfig,
    color: [u8; 4],
    cue_color: [u8; 4],
}

impl Monster {
    /// Size of the monster's cube for the given config.
    pub fn scale(config: &GameConfig) -> Vec3 {
        Vec3::new(
            config.maze.cell_size * 1.2,
            config.maze.wall_height * 1.5,
            config.maze.cell_size * 1.2,
        )
    }

    /// Start position for a spawn point: same x/z, floating so the cube rests on the
    /// path.
    pub fn place(spawn: Vec3, config: &GameConfig) -> Vec3 {
        spawn.with_y(config.maze.path_height + Self::scale(config).y() / 2.0)
    }

    /// Creates a monster at `start`, which should come from [`Monster::place`].
    pub fn new(id: EntityId, start: Vec3, config: &GameConfig) -> Self {
        Self {
            id,
            enabled: true,
            position: start,
            facing: Vec3::Z,
            start,
            patrol_x: start.x(),
            patrol_phase: 0.0,
            patrol_target: None,
            cooldown: 0.0,
            state: MonsterState::Patrolling,
            scale: Self::scale(config),
            settings: config.monster.clone(),
            color: config.colors.monster,
            cue_color: config.colors.monster_attack_cue,
        }
    }

    /// Returns to `start` in the patrolling state with the attack ready.
    pub fn reset(&mut self, start: Vec3) {
        self.position = start;
        self.start = start;
        self.patrol_x = start.x();
        self.facing = Vec3::Z;
        self.patrol_phase = 0.0;
        self.patrol_target = None;
        self.cooldown = 0.0;
        self.state = MonsterState::Patrolling;
        self.enabled = true;
    }

    pub fn state(&self) -> MonsterState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn yaw(&self) -> f32 {
        yaw_of(self.facing)
    }

    /// Seconds until the next attack may start. Negative once it is ready.
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn color(&self) -> [u8; 4] {
        self.color
    }

    fn face(&mut self, direction: Vec3) {
        let flat = direction.horizontal().normalize();
        if !flat.is_zero() {
            self.facing = flat;
        }
    }

    fn set_state(&mut self, state: MonsterState) {
        if mem::discriminant(&self.state) != mem::discriminant(&state) {
            log::trace!("monster {}: {:?} -> {:?}", self.id, self.state, state);
        }
        self.state = state;
    }

    fn fire(&mut self, target: Vec3, ctx: &mut FrameContext<'_>) {
        let mut direction = (target - self.position).horizontal().normalize();
        if direction.is_zero() {
            direction = self.facing;
        }
        let origin = self.position + self.facing * (self.scale.x() / 2.0 + 0.1);
        ctx.push(Command::SpawnProjectile(ProjectileLaunch { origin, direction }));

        self.cooldown = self.settings.attack_cooldown;
        self.set_state(MonsterState::Cooling(self.cooldown));
        ctx.push(Command::Recolor {
            id: self.id,
            color: self.color,
        });
    }

    fn chase(&mut self, player: Vec3, dt: f32) {
        let direction = (player - self.position).horizontal().normalize();
        self.position += direction * (self.settings.speed * dt);
        self.face(direction);
    }

    fn patrol(&mut self, dt: f32) {
        match self.settings.patrol_mode {
            PatrolMode::Linear => {
                let y = self.position.y();
                let a = Vec3::new(self.patrol_x, y, self.start.z());
                let b = Vec3::new(self.patrol_x + self.settings.patrol_amplitude, y, self.start.z());

                let target = match self.patrol_target {
                    Some(current) if self.position.distance_to(&current) >= PATROL_ARRIVAL_DISTANCE => {
                        current
                    }
                    Some(current) if current == a => b,
                    _ => a,
                };
                self.patrol_target = Some(target);

                let distance = self.position.distance_to(&target);
                let direction = (target - self.position).normalize();
                let max_step = self.settings.speed * dt;
                self.position += direction * max_step.min(distance);
                self.face(direction);
            }
            PatrolMode::Sine => {
                self.patrol_phase += dt * self.settings.patrol_frequency;
                let old_x = self.position.x();
                let new_x = self.patrol_x + self.patrol_phase.sin() * self.settings.patrol_amplitude;
                self.position = Vec3::new(new_x, self.position.y(), self.start.z());
                self.facing = if new_x > old_x { Vec3::X } else { Vec3::NEG_X };
            }
        }
    }
}

impl Updatable for Monster {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let dt = ctx.dt;

        if let MonsterState::WindingUp { remaining, target } = self.state {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                self.state = MonsterState::WindingUp { remaining, target };
                self.face(target - self.position);
            } else {
                self.fire(target, ctx);
            }
            return;
        }

        self.cooldown -= dt;

        let vision = self.settings.vision_range;
        let seen = ctx
            .player
            .map(|view| view.position)
            .filter(|position| self.position.distance_to(position) < vision);

        match seen {
            Some(target) if self.cooldown <= 0.0 => {
                self.set_state(MonsterState::WindingUp {
                    remaining: self.settings.attack_windup,
                    target,
                });
                ctx.push(Command::Recolor {
                    id: self.id,
                    color: self.cue_color,
                });
                return;
            }
            Some(target) => self.chase(target, dt),
            None => self.patrol(dt),
        }

        let state = if self.cooldown > 0.0 {
            MonsterState::Cooling(self.cooldown)
        } else if seen.is_some() {
            MonsterState::Chasing
        } else {
            MonsterState::Patrolling
        };
        self.set_state(state);
    }
}
