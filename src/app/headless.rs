//! Scene and HUD collaborators that only log.
//!
//! The binary has no window: every call the game makes to draw, move or recolour
//! something ends up as a `debug!`/`trace!` record, and the live entity table is
//! kept so the driver can check that nothing leaks between games.

use crate::math::Vec3;
use crate::renderer::{CameraPose, EntityId, EntitySpec, Hud, Model, Outcome, Scene};
use std::collections::HashMap;

/// Headless [`Scene`].
#[derive(Debug, Default)]
pub struct LogScene {
    next_id: u64,
    live: HashMap<EntityId, &'static str>,
    quit: bool,
}

impl LogScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities spawned and not yet destroyed.
    pub fn live_entities(&self) -> usize {
        self.live.len()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn name(&self, id: EntityId) -> &'static str {
        self.live.get(&id).copied().unwrap_or("<destroyed>")
    }
}

impl Scene for LogScene {
    fn spawn(&mut self, spec: EntitySpec<'_>) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        let model = match spec.model {
            Model::Cube => "cube".to_string(),
            Model::Sphere => "sphere".to_string(),
            Model::Terrain(mesh) => format!(
                "terrain ({} vertices, {} triangles)",
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
        };
        log::debug!(
            "spawn {} '{}': {} at {:?} scale {:?} collider {:?}",
            id,
            spec.name,
            model,
            spec.position,
            spec.scale,
            spec.collider
        );
        self.live.insert(id, spec.name);
        id
    }

    fn destroy(&mut self, id: EntityId) {
        match self.live.remove(&id) {
            Some(name) => log::debug!("destroy {} '{}'", id, name),
            None => log::warn!("destroy of unknown entity {}", id),
        }
    }

    fn set_enabled(&mut self, id: EntityId, enabled: bool) {
        log::debug!("{} '{}' enabled = {}", id, self.name(id), enabled);
    }

    fn set_transform(&mut self, id: EntityId, position: Vec3, yaw: f32) {
        log::trace!("{} '{}' at {:?} yaw {:.1}", id, self.name(id), position, yaw);
    }

    fn set_color(&mut self, id: EntityId, color: [u8; 4]) {
        log::debug!("{} '{}' colour {:?}", id, self.name(id), color);
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        log::trace!("{} '{}' visible = {}", id, self.name(id), visible);
    }

    fn attach_camera(&mut self, id: EntityId, fov: f32) {
        log::debug!("camera attached to {} '{}' (fov {})", id, self.name(id), fov);
    }

    fn place_camera(&mut self, pose: CameraPose) {
        log::debug!("camera at {:?} rotation {:?}", pose.position, pose.rotation);
    }

    fn set_pointer_locked(&mut self, locked: bool) {
        log::debug!("pointer locked = {}", locked);
    }

    fn quit(&mut self) {
        log::debug!("scene quit");
        self.quit = true;
    }
}

/// Headless [`Hud`]. Remembers the visible screen and the last health shown.
#[derive(Debug, Default)]
pub struct LogHud {
    screen: Option<&'static str>,
    health: Option<(u32, u32)>,
    last_outcome: Option<Outcome>,
}

impl LogHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Option<&'static str> {
        self.screen
    }

    pub fn health(&self) -> Option<(u32, u32)> {
        self.health
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    fn show(&mut self, screen: &'static str) {
        log::debug!("hud: {}", screen);
        self.screen = Some(screen);
    }
}

impl Hud for LogHud {
    fn show_menu(&mut self) {
        self.show("main menu");
    }

    fn show_pause_menu(&mut self) {
        self.show("pause menu");
    }

    fn show_game_over(&mut self, outcome: Outcome, message: &str) {
        log::debug!("hud: {:?} '{}'", outcome, message);
        self.screen = Some("game over");
        self.last_outcome = Some(outcome);
    }

    fn show_hud(&mut self) {
        self.show("hud");
    }

    fn hide_all(&mut self) {
        log::trace!("hud: hide all");
        self.screen = None;
    }

    fn update_health(&mut self, current: u32, max: u32) {
        log::debug!("hud: health {}/{}", current, max);
        self.health = Some((current, max));
    }
}
