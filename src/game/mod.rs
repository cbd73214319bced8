//! Game state management module.
//!
//! This module defines [`Game`], which owns the maze session and every gameplay entity
//! and moves between the screens described by [`GameState`]:
//!
//! ```text
//!            start            escape             main menu
//!   Menu ──────────▶ Playing ───────▶ Paused ──────────────▶ Menu
//!    ▲                │  ▲  ◀─────────  │
//!    │     goal/caught │  │   resume
//!    │                ▼  │ restart
//!    └──────────── Win / Lose
//!        main menu
//! ```
//!
//! Entities only run while the game is [`GameState::Playing`]. Everything visible goes
//! through the [`Scene`] and [`Hud`] collaborators handed to [`Game::new`].

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod goal;
pub mod keys;
pub mod player;
pub mod projectile;


use self::collision::TriggerTracker;
use self::enemy::Monster;
use self::entity::{Command, FrameContext, GameEvent, TriggerEvent, TriggerListener, Updatable};
use self::goal::Goal;
use self::keys::{GameKey, KeyState, UiAction};
use self::player::{Damage, Player};
use self::projectile::Projectile;
use crate::benchmarks;
use crate::config::GameConfig;
use crate::maze::spawn::grid_to_world;
use crate::maze::{Grid, MazeGenerator, SpawnLocator, SpawnSet};
use crate::math::{Vec3, look_rotation};
use crate::renderer::{
    CameraPose, Collider, EntityId, EntitySpec, Hud, Mesh, MeshBuilder, Model, Outcome, Scene,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

/// Shown on the win screen.
pub const WIN_MESSAGE: &str = "You Win!";
/// Shown on the lose screen.
pub const LOSE_MESSAGE: &str = "You were caught by the monster!";

/// The screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    Win,
    Lose,
}

impl GameState {
    /// Whether `self -> to` is one of the allowed transitions.
    pub fn can_transition_to(self, to: GameState) -> bool {
        use GameState::*;
        matches!(
            (self, to),
            (Menu, Playing)
                | (Playing, Paused)
                | (Paused, Playing)
                | (Paused, Menu)
                | (Playing, Win)
                | (Playing, Lose)
                | (Win, Menu)
                | (Lose, Menu)
                | (Win, Playing)
                | (Lose, Playing)
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Menu => "Menu",
            GameState::Playing => "Playing",
            GameState::Paused => "Paused",
            GameState::Win => "Win",
            GameState::Lose => "Lose",
        };
        f.write_str(name)
    }
}

/// Result of a state change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: GameState, to: GameState },
    /// Already in the requested state.
    Unchanged,
    /// Not an allowed edge; nothing happened.
    Rejected { from: GameState, to: GameState },
}

/// Maze data for the game in progress.
struct Session {
    grid: Grid,
    mesh: Mesh,
    spawns: SpawnSet,
    terrain: EntityId,
}

/// Top-level game controller.
pub struct Game<S: Scene, H: Hud> {
    config: GameConfig,
    rng: StdRng,
    scene: S,
    hud: H,
    state: GameState,
    session: Option<Session>,
    player: Option<Player>,
    goal: Option<Goal>,
    monster: Option<Monster>,
    projectiles: Vec<Projectile>,
    keys: KeyState,
    triggers: TriggerTracker,
    /// Seconds left before a reached goal turns into a win.
    pending_win: Option<f32>,
    games_started: u32,
    quit_requested: bool,
}

impl<S: Scene, H: Hud> Game<S, H> {
    /// Creates the game on the main menu. The RNG is seeded from `config.seed` when set.
    pub fn new(config: GameConfig, scene: S, hud: H) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut game = Self {
            config,
            rng,
            scene,
            hud,
            state: GameState::Menu,
            session: None,
            player: None,
            goal: None,
            monster: None,
            projectiles: Vec::new(),
            keys: KeyState::new(),
            triggers: TriggerTracker::new(),
            pending_win: None,
            games_started: 0,
            quit_requested: false,
        };
        game.hud.show_menu();
        let pose = game.menu_camera();
        game.scene.place_camera(pose);
        game.scene.set_pointer_locked(false);
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.session.as_ref().map(|session| &session.grid)
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.session.as_ref().map(|session| &session.mesh)
    }

    pub fn spawns(&self) -> Option<SpawnSet> {
        self.session.as_ref().map(|session| session.spawns)
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Mutable player access for input drivers that steer directly.
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pending_win(&self) -> Option<f32> {
        self.pending_win
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Set once the player asked to leave the application.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Generates a fresh maze and enters [`GameState::Playing`].
    ///
    /// Valid from the menu and from either game-over screen.
    pub fn start_game(&mut self) -> Transition {
        match self.state {
            GameState::Menu | GameState::Win | GameState::Lose => {}
            GameState::Playing => return Transition::Unchanged,
            from => return self.reject(from, GameState::Playing),
        }

        self.new_session();
        self.transition(GameState::Playing)
    }

    /// Like [`Game::start_game`], but plays on `grid` instead of a generated maze.
    pub fn start_with_grid(&mut self, grid: Grid) -> Transition {
        match self.state {
            GameState::Menu | GameState::Win | GameState::Lose => {}
            GameState::Playing => return Transition::Unchanged,
            from => return self.reject(from, GameState::Playing),
        }

        self.load_session(grid);
        self.transition(GameState::Playing)
    }

    /// Starts over from a game-over screen with a new maze.
    pub fn restart(&mut self) -> Transition {
        match self.state {
            GameState::Win | GameState::Lose => self.start_game(),
            GameState::Playing => Transition::Unchanged,
            from => self.reject(from, GameState::Playing),
        }
    }

    pub fn pause(&mut self) -> Transition {
        self.transition(GameState::Paused)
    }

    pub fn resume(&mut self) -> Transition {
        match self.state {
            GameState::Paused | GameState::Playing => self.transition(GameState::Playing),
            from => self.reject(from, GameState::Playing),
        }
    }

    pub fn go_to_menu(&mut self) -> Transition {
        self.transition(GameState::Menu)
    }

    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.quit_requested = true;
        self.scene.quit();
    }

    /// Handles a key press.
    ///
    /// Escape pauses, resumes, leaves a game-over screen or quits from the menu.
    /// Movement keys update the player's intent.
    pub fn handle_key(&mut self, key: GameKey) -> Transition {
        if key.is_movement() {
            self.keys.press_key(key);
            self.sync_intent();
            return Transition::Unchanged;
        }

        match self.state {
            GameState::Playing => self.pause(),
            GameState::Paused => self.resume(),
            GameState::Win | GameState::Lose => self.go_to_menu(),
            GameState::Menu => {
                self.quit();
                Transition::Unchanged
            }
        }
    }

    pub fn release_key(&mut self, key: GameKey) {
        self.keys.release_key(key);
        self.sync_intent();
    }

    /// Handles a click on one of the screen buttons.
    pub fn handle_ui(&mut self, action: UiAction) -> Transition {
        match action {
            UiAction::Start => self.start_game(),
            UiAction::Exit => {
                self.quit();
                Transition::Unchanged
            }
            UiAction::Restart => self.restart(),
            UiAction::MainMenu => self.go_to_menu(),
            UiAction::Resume => self.resume(),
        }
    }

    /// Advances one frame. Does nothing unless playing.
    pub fn update(&mut self, dt: f32) {
        if self.state != GameState::Playing {
            return;
        }

        if let Some(remaining) = self.pending_win {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.pending_win = None;
                log::info!("{}", WIN_MESSAGE);
                self.transition(GameState::Win);
                return;
            }
            self.pending_win = Some(remaining);
        }

        let Some(session) = self.session.as_ref() else {
            return;
        };

        let mut ctx = FrameContext::new(dt, &session.grid, None);
        if let Some(player) = self.player.as_mut().filter(|p| p.enabled) {
            player.update(&mut ctx);
        }
        ctx.player = self.player.as_ref().filter(|p| p.enabled).map(Player::view);

        if let Some(monster) = self.monster.as_mut().filter(|m| m.enabled) {
            monster.update(&mut ctx);
        }
        for projectile in self.projectiles.iter_mut().filter(|p| p.enabled) {
            projectile.update(&mut ctx);
        }
        let commands = ctx.commands;

        self.sync_transforms();
        self.apply(commands);
        self.reap_projectiles();

        if self.state == GameState::Playing {
            self.detect_triggers();
        }
    }

    /// Delivers a trigger-enter event, either from the built-in overlap tracking or
    /// from an external physics engine.
    pub fn trigger_enter(&mut self, event: TriggerEvent) {
        if self.state != GameState::Playing {
            return;
        }

        let player = self.player.as_ref().filter(|p| p.enabled).map(|p| p.id);
        let Some(goal) = self.goal.as_mut().filter(|g| g.id == event.trigger) else {
            return;
        };

        if let Some(GameEvent::GoalReached) = goal.on_trigger_enter(event.other, player) {
            if self.pending_win.is_none() {
                log::info!("Goal reached, winning in {:.2}s", self.config.win_delay);
                self.pending_win = Some(self.config.win_delay);
            }
        }
    }

    fn reject(&self, from: GameState, to: GameState) -> Transition {
        log::warn!("Rejected game state transition: {} -> {}", from, to);
        Transition::Rejected { from, to }
    }

    fn transition(&mut self, to: GameState) -> Transition {
        let from = self.state;
        if from == to {
            return Transition::Unchanged;
        }
        if !from.can_transition_to(to) {
            return self.reject(from, to);
        }

        log::info!("Game state transition: {} -> {}", from, to);
        self.state = to;
        self.hud.hide_all();

        match to {
            GameState::Menu => {
                self.hud.show_menu();
                self.deactivate(false);
                let pose = self.menu_camera();
                self.scene.place_camera(pose);
                self.scene.set_pointer_locked(false);
                self.unload();
            }
            GameState::Playing => {
                self.hud.show_hud();
                self.activate();
                if let Some(player) = &self.player {
                    self.hud
                        .update_health(player.health.current(), player.health.max());
                    self.scene
                        .attach_camera(player.id, self.config.camera.player_fov);
                }
                self.scene.set_pointer_locked(true);
            }
            GameState::Paused => {
                self.hud.show_pause_menu();
                self.deactivate(true);
                let pose = self.pause_camera();
                self.scene.place_camera(pose);
                self.scene.set_pointer_locked(false);
            }
            GameState::Win | GameState::Lose => {
                let (outcome, message) = if to == GameState::Win {
                    (Outcome::Win, WIN_MESSAGE)
                } else {
                    (Outcome::Lose, LOSE_MESSAGE)
                };
                self.pending_win = None;
                self.hud.show_game_over(outcome, message);
                self.deactivate(false);
                let pose = CameraPose::new(
                    self.config.camera.game_over_position,
                    self.config.camera.game_over_rotation,
                );
                self.scene.place_camera(pose);
                self.scene.set_pointer_locked(false);
            }
        }

        Transition::Changed { from, to }
    }

    /// Regenerates the maze, then loads it.
    fn new_session(&mut self) {
        let dimension = self.config.maze.dimension;
        let rng = &mut self.rng;
        let grid = benchmarks::time("maze_generation", || MazeGenerator::generate(rng, dimension));
        self.load_session(grid);
    }

    /// Builds the mesh for `grid`, finds spawns and creates or resets the entities.
    fn load_session(&mut self, grid: Grid) {
        let builder = MeshBuilder::from_config(&self.config);
        let mesh = benchmarks::time("mesh_building", || builder.build(&grid));
        let spawns = SpawnLocator::new(&grid).locate(&mut self.rng);

        if let Some(old) = self.session.take() {
            self.scene.destroy(old.terrain);
        }
        self.destroy_projectiles();

        let terrain = self.scene.spawn(EntitySpec {
            name: "maze_ground_mesh",
            model: Model::Terrain(&mesh),
            color: [255, 255, 255, 255],
            scale: Vec3::new(1.0, 1.0, 1.0),
            position: Vec3::ZERO,
            collider: Collider::Mesh,
        });

        let d = grid.dimension();
        let cell = self.config.maze.cell_size;
        let ground = self.config.maze.path_height + self.config.player.height_offset;
        let player_at = grid_to_world(spawns.player, d, cell, ground);
        let goal_at = Goal::place(grid_to_world(spawns.goal, d, cell, ground), &self.config);
        let monster_at = Monster::place(grid_to_world(spawns.monster, d, cell, ground), &self.config);

        match self.player.as_mut() {
            Some(player) => {
                player.reset(player_at);
                self.scene.set_transform(player.id, player_at, 0.0);
                self.scene.set_visible(player.id, true);
            }
            None => {
                let id = self.scene.spawn(EntitySpec {
                    name: "player_entity",
                    model: Model::Cube,
                    color: self.config.colors.player,
                    scale: Vec3::from(self.config.player.collider_half_extents) * 2.0,
                    position: player_at,
                    collider: Collider::Box,
                });
                self.player = Some(Player::new(id, player_at, &self.config));
            }
        }

        match self.goal.as_mut() {
            Some(goal) => {
                goal.reset(goal_at);
                self.scene.set_transform(goal.id, goal_at, 0.0);
            }
            None => {
                let id = self.scene.spawn(EntitySpec {
                    name: "goal_entity",
                    model: Model::Cube,
                    color: self.config.colors.goal,
                    scale: Goal::scale(&self.config),
                    position: goal_at,
                    collider: Collider::Trigger,
                });
                self.goal = Some(Goal::new(id, goal_at, &self.config));
            }
        }

        match self.monster.as_mut() {
            Some(monster) => {
                monster.reset(monster_at);
                self.scene.set_transform(monster.id, monster_at, monster.yaw());
                self.scene.set_color(monster.id, monster.color());
            }
            None => {
                let id = self.scene.spawn(EntitySpec {
                    name: "monster_entity",
                    model: Model::Cube,
                    color: self.config.colors.monster,
                    scale: Monster::scale(&self.config),
                    position: monster_at,
                    collider: Collider::Box,
                });
                self.monster = Some(Monster::new(id, monster_at, &self.config));
            }
        }

        self.games_started += 1;
        log::info!(
            "New game #{}: {}x{} maze, player {:?}, goal {:?}, monster {:?}",
            self.games_started,
            d,
            d,
            spawns.player,
            spawns.goal,
            spawns.monster
        );
        log::debug!(
            "{} path cells, {} vertices, {} triangles",
            grid.path_count(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        self.triggers.clear();
        self.pending_win = None;
        self.keys.clear();
        self.session = Some(Session {
            grid,
            mesh,
            spawns,
            terrain,
        });
    }

    /// Destroys every gameplay entity and the maze mesh.
    fn unload(&mut self) {
        if let Some(player) = self.player.take() {
            self.scene.destroy(player.id);
        }
        if let Some(goal) = self.goal.take() {
            self.scene.destroy(goal.id);
        }
        if let Some(monster) = self.monster.take() {
            self.scene.destroy(monster.id);
        }
        self.destroy_projectiles();
        if let Some(session) = self.session.take() {
            self.scene.destroy(session.terrain);
        }
        self.triggers.clear();
        self.pending_win = None;
        self.keys.clear();
    }

    fn activate(&mut self) {
        let scene = &mut self.scene;
        if let Some(player) = self.player.as_mut() {
            player.enabled = true;
            scene.set_enabled(player.id, true);
        }
        if let Some(goal) = self.goal.as_mut() {
            goal.enabled = true;
            scene.set_enabled(goal.id, true);
        }
        if let Some(monster) = self.monster.as_mut() {
            monster.enabled = true;
            scene.set_enabled(monster.id, true);
        }
        if let Some(session) = &self.session {
            scene.set_enabled(session.terrain, true);
        }
    }

    /// Freezes gameplay entities (optionally keeping the player) and clears projectiles.
    fn deactivate(&mut self, keep_player: bool) {
        let scene = &mut self.scene;
        if let Some(player) = self.player.as_mut().filter(|_| !keep_player) {
            player.enabled = false;
            scene.set_enabled(player.id, false);
        }
        if let Some(goal) = self.goal.as_mut() {
            goal.enabled = false;
            scene.set_enabled(goal.id, false);
        }
        if let Some(monster) = self.monster.as_mut() {
            monster.enabled = false;
            scene.set_enabled(monster.id, false);
        }
        self.destroy_projectiles();
    }

    fn destroy_projectiles(&mut self) {
        for projectile in self.projectiles.drain(..) {
            self.scene.destroy(projectile.id);
        }
    }

    fn reap_projectiles(&mut self) {
        let scene = &mut self.scene;
        self.projectiles.retain(|projectile| {
            if !projectile.is_alive() {
                scene.destroy(projectile.id);
            }
            projectile.is_alive()
        });
    }

    fn sync_intent(&mut self) {
        let intent = self.keys.intent();
        if let Some(player) = self.player.as_mut() {
            player.movement.intent = intent;
        }
    }

    fn sync_transforms(&mut self) {
        if let Some(player) = self.player.as_ref().filter(|p| p.enabled) {
            self.scene
                .set_transform(player.id, player.position(), player.movement.yaw);
            self.scene.set_visible(player.id, player.visible());
        }
        if let Some(monster) = self.monster.as_ref().filter(|m| m.enabled) {
            self.scene
                .set_transform(monster.id, monster.position(), monster.yaw());
        }
        for projectile in &self.projectiles {
            self.scene
                .set_transform(projectile.id, projectile.position(), 0.0);
        }
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Recolor { id, color } => self.scene.set_color(id, color),
                _ if self.state != GameState::Playing => {}
                Command::SpawnProjectile(launch) => {
                    let id = self.scene.spawn(EntitySpec {
                        name: "monster_projectile",
                        model: Model::Sphere,
                        color: self.config.colors.projectile,
                        scale: Projectile::scale(&self.config),
                        position: Projectile::place(&launch, &self.config),
                        collider: Collider::Sphere,
                    });
                    self.projectiles
                        .push(Projectile::new(id, launch, &self.config));
                }
                Command::DamagePlayer(amount) => {
                    let Some(player) = self.player.as_mut().filter(|p| p.enabled) else {
                        continue;
                    };
                    let max = player.health.max();
                    match player.take_damage(amount) {
                        Damage::Ignored => {}
                        Damage::Hurt { remaining } => self.hud.update_health(remaining, max),
                        Damage::Killed => {
                            self.hud.update_health(0, max);
                            log::info!("{}", LOSE_MESSAGE);
                            self.transition(GameState::Lose);
                        }
                    }
                }
            }
        }
    }

    fn detect_triggers(&mut self) {
        let (Some(goal), Some(player)) = (self.goal.as_ref(), self.player.as_ref()) else {
            return;
        };
        if !goal.enabled || !player.enabled {
            return;
        }

        let overlapping = goal.bounds().intersects(&player.bounds());
        let event = TriggerEvent {
            trigger: goal.id,
            other: player.id,
        };
        if self.triggers.observe(event.trigger, event.other, overlapping) {
            self.trigger_enter(event);
        }
    }

    fn menu_camera(&self) -> CameraPose {
        CameraPose::new(
            self.config.camera.menu_position,
            self.config.camera.menu_rotation,
        )
    }

    /// Above and behind the player, looking at them with a little extra tilt.
    fn pause_camera(&self) -> CameraPose {
        let Some(player) = &self.player else {
            return self.menu_camera();
        };
        let target = player.position();
        let position = target + Vec3::from(self.config.camera.pause_offset);
        let rotation =
            look_rotation(position, target) + Vec3::new(self.config.camera.pause_tilt, 0.0, 0.0);
        CameraPose { position, rotation }
    }
}
