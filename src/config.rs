//! Game configuration.
//!
//! [`GameConfig`] is built once at startup (from defaults, optionally overridden by a
//! JSON file) and then handed by reference to every component constructor. Nothing in
//! the crate reads configuration from a global.
//!
//! # Example
//! ```
//! use cubemaze::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "maze": { "dimension": 8 } }"#).unwrap();
//! assert_eq!(config.maze.dimension, 9); // even dimensions are bumped to odd
//! assert_eq!(config.player.max_health, 3);
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How the monster moves while the player is out of sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatrolMode {
    /// Ping-pong between two points `amplitude` apart along x.
    Linear,
    /// `x = origin + amplitude * sin(phase)`.
    Sine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Grid side length in cells. Normalised to an odd value of at least 3.
    pub dimension: usize,
    pub wall_height: f32,
    pub path_height: f32,
    pub cell_size: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            dimension: 20,
            wall_height: 1.0,
            path_height: 0.0,
            cell_size: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    /// Ground clearance added to the path height when placing entities.
    pub height_offset: f32,
    pub max_health: u32,
    /// Seconds of damage immunity after a hit.
    pub invulnerability_time: f32,
    /// Half extents of the player's box collider.
    pub collider_half_extents: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            height_offset: 0.5,
            max_health: 3,
            invulnerability_time: 1.0,
            collider_half_extents: [0.4, 1.0, 0.4],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub speed: f32,
    pub vision_range: f32,
    pub patrol_mode: PatrolMode,
    pub patrol_amplitude: f32,
    pub patrol_frequency: f32,
    pub attack_cooldown: f32,
    pub attack_windup: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_scale: f32,
    pub attack_damage: u32,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            speed: 2.5,
            vision_range: 10.0,
            patrol_mode: PatrolMode::Sine,
            patrol_amplitude: 8.0,
            patrol_frequency: 1.0,
            attack_cooldown: 3.0,
            attack_windup: 1.0,
            projectile_speed: 15.0,
            projectile_lifetime: 2.0,
            projectile_scale: 0.5,
            attack_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub player_fov: f32,
    pub menu_position: [f32; 3],
    pub menu_rotation: [f32; 3],
    pub game_over_position: [f32; 3],
    pub game_over_rotation: [f32; 3],
    /// Offset from the player used for the detached pause camera.
    pub pause_offset: [f32; 3],
    /// Extra downward tilt applied to the pause camera after aiming it.
    pub pause_tilt: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            player_fov: 90.0,
            menu_position: [0.0, 20.0, -30.0],
            menu_rotation: [30.0, 0.0, 0.0],
            game_over_position: [0.0, 0.0, -10.0],
            game_over_rotation: [0.0, 0.0, 0.0],
            pause_offset: [0.0, 5.0, -10.0],
            pause_tilt: 10.0,
        }
    }
}

/// RGBA colours for everything the game asks the scene to draw.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub player: [u8; 4],
    pub goal: [u8; 4],
    pub monster: [u8; 4],
    pub monster_attack_cue: [u8; 4],
    pub projectile: [u8; 4],
    pub ground_path: [u8; 4],
    pub ground_wall: [u8; 4],
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            player: [0, 127, 255, 255],
            goal: [255, 127, 0, 255],
            monster: [255, 0, 0, 255],
            monster_attack_cue: [255, 255, 0, 255],
            projectile: [255, 0, 255, 255],
            ground_path: [191, 191, 191, 255],
            ground_wall: [64, 64, 64, 255],
        }
    }
}

/// Every tunable knob of the game, read once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub maze: MazeConfig,
    pub player: PlayerConfig,
    pub monster: MonsterConfig,
    pub camera: CameraConfig,
    pub colors: ColorConfig,
    /// Seconds between the player touching the goal and the win screen.
    pub win_delay: f32,
    /// Fixed RNG seed. `None` seeds from entropy on every run.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            player: PlayerConfig::default(),
            monster: MonsterConfig::default(),
            camera: CameraConfig::default(),
            colors: ColorConfig::default(),
            win_delay: 0.1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration with the maze dimension already normalised.
    pub fn new() -> Self {
        Self::default().normalized()
    }

    /// Parses a JSON document, filling unspecified fields with defaults, then validates.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rounds the maze dimension up to the nearest odd value of at least 3.
    pub fn normalized(mut self) -> Self {
        let requested = self.maze.dimension;
        self.maze.dimension = normalize_dimension(requested);
        if self.maze.dimension != requested {
            log::debug!(
                "maze dimension {} coerced to {}",
                requested,
                self.maze.dimension
            );
        }
        self
    }

    /// Normalises the dimension and rejects values the game cannot run with.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let config = self.normalized();

        positive("maze.cell_size", config.maze.cell_size)?;
        if config.maze.wall_height <= config.maze.path_height {
            return Err(ConfigError::Invalid {
                field: "maze.wall_height",
                reason: format!(
                    "must be above path height {} (got {})",
                    config.maze.path_height, config.maze.wall_height
                ),
            });
        }
        positive("player.speed", config.player.speed)?;
        if config.player.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_health",
                reason: "must be at least 1".to_string(),
            });
        }
        non_negative(
            "player.invulnerability_time",
            config.player.invulnerability_time,
        )?;
        positive("monster.speed", config.monster.speed)?;
        non_negative("monster.vision_range", config.monster.vision_range)?;
        non_negative("monster.attack_cooldown", config.monster.attack_cooldown)?;
        non_negative("monster.attack_windup", config.monster.attack_windup)?;
        non_negative("monster.patrol_amplitude", config.monster.patrol_amplitude)?;
        non_negative("monster.patrol_frequency", config.monster.patrol_frequency)?;
        positive("monster.projectile_scale", config.monster.projectile_scale)?;
        positive("monster.projectile_speed", config.monster.projectile_speed)?;
        positive(
            "monster.projectile_lifetime",
            config.monster.projectile_lifetime,
        )?;
        non_negative("win_delay", config.win_delay)?;

        Ok(config)
    }
}

/// Smallest odd value that is at least `max(requested, 3)`.
pub fn normalize_dimension(requested: usize) -> usize {
    let dimension = requested.max(3);
    if dimension % 2 == 0 {
        dimension + 1
    } else {
        dimension
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number (got {})", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative (got {})", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_tuning() {
        let config = GameConfig::new();
        assert_eq!(config.maze.dimension, 21);
        assert_eq!(config.monster.patrol_mode, PatrolMode::Sine);
        assert_eq!(config.player.max_health, 3);
        assert!((config.win_delay - 0.1).abs() < f32::EPSILON);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_dimension_normalisation() {
        assert_eq!(normalize_dimension(0), 3);
        assert_eq!(normalize_dimension(3), 3);
        assert_eq!(normalize_dimension(4), 5);
        assert_eq!(normalize_dimension(20), 21);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json_str(
            r#"{ "monster": { "patrol_mode": "linear", "vision_range": 4.0 }, "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.monster.patrol_mode, PatrolMode::Linear);
        assert_eq!(config.monster.vision_range, 4.0);
        assert_eq!(config.monster.speed, 2.5);
        assert_eq!(config.seed, Some(7));
        assert!((config.win_delay - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_flat_walls() {
        let err = GameConfig::from_json_str(r#"{ "maze": { "wall_height": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "maze.wall_height",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_patrol_and_projectile_sizes() {
        for (json, field) in [
            (r#"{ "monster": { "patrol_amplitude": -1.0 } }"#, "monster.patrol_amplitude"),
            (r#"{ "monster": { "patrol_frequency": -0.5 } }"#, "monster.patrol_frequency"),
            (r#"{ "monster": { "projectile_scale": 0.0 } }"#, "monster.projectile_scale"),
        ] {
            match GameConfig::from_json_str(json) {
                Err(ConfigError::Invalid { field: found, .. }) => assert_eq!(found, field),
                other => panic!("{} should be rejected, got {:?}", field, other),
            }
        }

        let mut config = GameConfig::new();
        config.monster.patrol_frequency = f32::NAN;
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json_str("{ maze: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
