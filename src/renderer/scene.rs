//! Narrow interfaces to the rendering engine and the on-screen UI.
//!
//! The game never draws anything itself. It describes entities with an [`EntitySpec`],
//! gets an [`EntityId`] back, and from then on only moves, recolours, toggles or
//! destroys them through [`Scene`]. Screens and the health readout go through [`Hud`].

use super::terrain::Mesh;
use crate::math::Vec3;
use std::fmt;

/// Handle to an entity owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Model<'a> {
    Cube,
    Sphere,
    Terrain(&'a Mesh),
}

/// Collision shape the engine should attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    Box,
    Sphere,
    Mesh,
    /// Box volume that reports overlap but does not block.
    Trigger,
}

/// Everything the scene needs to create an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec<'a> {
    pub name: &'static str,
    pub model: Model<'a>,
    pub color: [u8; 4],
    pub scale: Vec3,
    pub position: Vec3,
    pub collider: Collider,
}

/// Fixed camera placement. Rotation is `[pitch, yaw, roll]` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CameraPose {
    pub fn new(position: impl Into<Vec3>, rotation: impl Into<Vec3>) -> Self {
        Self {
            position: position.into(),
            rotation: rotation.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Entity and camera operations provided by the engine.
pub trait Scene {
    fn spawn(&mut self, spec: EntitySpec<'_>) -> EntityId;
    fn destroy(&mut self, id: EntityId);
    fn set_enabled(&mut self, id: EntityId, enabled: bool);
    /// Moves an entity and turns it to `yaw` degrees about the vertical axis.
    fn set_transform(&mut self, id: EntityId, position: Vec3, yaw: f32);
    fn set_color(&mut self, id: EntityId, color: [u8; 4]);
    fn set_visible(&mut self, id: EntityId, visible: bool);
    /// Parents the camera to an entity as a first-person view.
    fn attach_camera(&mut self, id: EntityId, fov: f32);
    /// Detaches the camera and puts it at a fixed pose.
    fn place_camera(&mut self, pose: CameraPose);
    fn set_pointer_locked(&mut self, locked: bool);
    fn quit(&mut self);
}

/// Screens and overlays.
pub trait Hud {
    fn show_menu(&mut self);
    fn show_pause_menu(&mut self);
    fn show_game_over(&mut self, outcome: Outcome, message: &str);
    fn show_hud(&mut self);
    fn hide_all(&mut self);
    fn update_health(&mut self, current: u32, max: u32);
}
