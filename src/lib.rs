//! Cubemaze - a 3D maze-chase game core
//!
//! A player runs through a procedurally generated maze toward a goal while a monster
//! patrols, chases and fires projectiles at them. The crate owns the game logic and
//! hands everything visible to narrow [`renderer::Scene`] and [`renderer::Hud`] traits,
//! so the same core runs behind a real engine or the headless driver in [`app`].
//!
//! # Architecture
//! - `maze/`: grid model, recursive-backtracker generation and spawn placement
//! - `renderer/`: terrain mesh synthesis, vertex layout and the collaborator traits
//! - `game/`: player, goal, monster and projectiles plus the [`game::Game`] state machine
//! - `config`: [`config::GameConfig`], defaults and JSON loading
//! - `math/`: the small [`math::Vec3`] type and angle helpers
//! - `app/`: logging collaborators, the autopilot and the frame driver
//! - `benchmarks/`: timing of maze generation, mesh building and frames
//!
//! # Example
//! ```
//! use cubemaze::app::{LogHud, LogScene};
//! use cubemaze::config::GameConfig;
//! use cubemaze::game::{Game, GameState};
//!
//! let mut config = GameConfig::new();
//! config.seed = Some(1);
//! let mut game = Game::new(config, LogScene::new(), LogHud::new());
//! game.start_game();
//! assert_eq!(game.state(), GameState::Playing);
//! assert_eq!(game.grid().map(|grid| grid.dimension()), Some(21));
//! ```

pub mod app;
pub mod benchmarks;
pub mod config;
pub mod game;
pub mod math;
pub mod maze;
pub mod renderer;
