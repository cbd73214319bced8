//! Application module for cubemaze.
//!
//! This module contains the headless frame driver the binary runs. There is no window:
//! the [`Game`] talks to logging collaborators and an [`Autopilot`] stands in for the
//! keyboard, walking the shortest route to the goal while the monster hunts it.
//!
//! # Module Structure
//!
//! - [`headless`]: [`LogScene`] and [`LogHud`], collaborators that log every call
//! - [`autopilot`]: [`Autopilot`], a route follower that steers the player
//!
//! # Frame Flow
//!
//! 1. **Input**: the autopilot sets the player's yaw and movement intent
//! 2. **Update**: [`Game::update`] advances every entity by the fixed `dt`
//! 3. **Outcome**: a round ends on win, loss, the frame limit or Ctrl-C
//!
//! # Threading Model
//!
//! Everything runs on the main thread. The only shared state is the shutdown flag set
//! by the Ctrl-C handler and polled once per frame.

pub mod autopilot;
pub mod headless;

pub use autopilot::Autopilot;
pub use headless::{LogHud, LogScene};

use crate::game::keys::{GameKey, UiAction};
use crate::game::{Game, GameState, Transition};
use crate::renderer::{Hud, Scene};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How the driver runs the game.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Games to play before quitting.
    pub rounds: u32,
    /// Frames after which an unfinished round is abandoned.
    pub max_frames: u32,
    /// Fixed frame time in seconds.
    pub dt: f32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            rounds: 1,
            max_frames: 60 * 120,
            dt: 1.0 / 60.0,
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Won,
    Lost,
    /// Hit the frame limit.
    TimedOut,
    /// Ctrl-C arrived mid-round.
    Interrupted,
}

/// Summary of one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    pub end: RoundEnd,
    pub frames: u32,
    /// Seconds of game time played.
    pub elapsed: f32,
    pub health: u32,
}

/// Drives a [`Game`] frame by frame.
pub struct App<S: Scene, H: Hud> {
    game: Game<S, H>,
    autopilot: Autopilot,
    options: AppOptions,
    shutdown: Arc<AtomicBool>,
}

impl<S: Scene, H: Hud> App<S, H> {
    pub fn new(game: Game<S, H>, options: AppOptions, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            game,
            autopilot: Autopilot::new(),
            options,
            shutdown,
        }
    }

    pub fn game(&self) -> &Game<S, H> {
        &self.game
    }

    fn interrupted(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Plays every round, then returns to the menu and quits.
    pub fn run(&mut self) -> Vec<RoundReport> {
        let mut reports = Vec::new();

        for round in 1..=self.options.rounds {
            if self.interrupted() || self.game.quit_requested() {
                break;
            }
            let Some(report) = self.play_round(round) else {
                break;
            };
            log::info!(
                "Round {}: {:?} after {} frames ({:.1}s), health {}",
                report.round,
                report.end,
                report.frames,
                report.elapsed,
                report.health
            );
            reports.push(report);
        }

        self.leave_round();
        // Escape on the main menu quits.
        self.game.handle_key(GameKey::Escape);
        reports
    }

    /// Starts a game from the current screen and plays it out. `None` if the game
    /// refused to start.
    fn play_round(&mut self, round: u32) -> Option<RoundReport> {
        let started = match self.game.state() {
            GameState::Win | GameState::Lose => self.game.handle_ui(UiAction::Restart),
            _ => self.game.handle_ui(UiAction::Start),
        };
        if !matches!(started, Transition::Changed { .. }) {
            log::error!("Could not start round {}: {:?}", round, started);
            return None;
        }
        self.plan_route();

        let dt = self.options.dt;
        let mut frames = 0;
        let end = loop {
            if self.interrupted() {
                break RoundEnd::Interrupted;
            }
            if frames >= self.options.max_frames {
                break RoundEnd::TimedOut;
            }

            if let Some(player) = self.game.player_mut() {
                self.autopilot.steer(player, dt);
            }
            let game = &mut self.game;
            crate::benchmark!("frame_update", game.update(dt));
            crate::benchmarks::record_frame();
            frames += 1;

            match self.game.state() {
                GameState::Win => break RoundEnd::Won,
                GameState::Lose => break RoundEnd::Lost,
                _ => {}
            }
        };

        let health = self
            .game
            .player()
            .map(|player| player.health.current())
            .unwrap_or(0);
        if matches!(end, RoundEnd::TimedOut | RoundEnd::Interrupted) {
            self.leave_round();
        }

        Some(RoundReport {
            round,
            end,
            frames,
            elapsed: frames as f32 * dt,
            health,
        })
    }

    fn plan_route(&mut self) {
        let (Some(grid), Some(spawns), Some(player)) =
            (self.game.grid(), self.game.spawns(), self.game.player())
        else {
            return;
        };
        let cell_size = self.game.config().maze.cell_size;
        let y = player.position().y();
        self.autopilot
            .plan(grid, spawns.player, spawns.goal, cell_size, y);
    }

    /// Back to the main menu from wherever the game is.
    fn leave_round(&mut self) {
        if self.game.state() == GameState::Playing {
            self.game.pause();
        }
        self.game.go_to_menu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn app(config: GameConfig, options: AppOptions) -> App<LogScene, LogHud> {
        let game = Game::new(config, LogScene::new(), LogHud::new());
        App::new(game, options, Arc::new(AtomicBool::new(false)))
    }

    fn calm_config(seed: u64) -> GameConfig {
        let mut config = GameConfig::new();
        config.maze.dimension = 9;
        config.seed = Some(seed);
        // keep the monster out of the way
        config.monster.vision_range = 0.0;
        config
    }

    #[test]
    fn test_autopilot_wins_every_round() {
        let mut app = app(
            calm_config(11),
            AppOptions {
                rounds: 3,
                ..AppOptions::default()
            },
        );
        let reports = app.run();

        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.end == RoundEnd::Won));
        assert!(reports.iter().all(|r| r.health == 3));
        assert_eq!(app.game().games_started(), 3);

        assert_eq!(app.game().state(), GameState::Menu);
        assert!(app.game().quit_requested());
        assert_eq!(app.game().scene().live_entities(), 0);
        assert!(app.game().scene().quit_requested());
        assert_eq!(app.game().hud().screen(), Some("main menu"));
    }

    #[test]
    fn test_frame_limit_abandons_round() {
        let mut app = app(
            calm_config(3),
            AppOptions {
                rounds: 2,
                max_frames: 1,
                ..AppOptions::default()
            },
        );
        let reports = app.run();

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.end == RoundEnd::TimedOut && r.frames == 1));
        assert!(reports.iter().all(|r| r.health == 3));
        assert_eq!(app.game().scene().live_entities(), 0);
    }

    #[test]
    fn test_shutdown_flag_stops_before_playing() {
        let shutdown = Arc::new(AtomicBool::new(true));
        let game = Game::new(calm_config(5), LogScene::new(), LogHud::new());
        let mut app = App::new(game, AppOptions::default(), shutdown);

        assert!(app.run().is_empty());
        assert_eq!(app.game().games_started(), 0);
        assert!(app.game().quit_requested());
    }
}
