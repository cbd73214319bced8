//! Renderer-facing data and interfaces.
//!
//! This module contains the terrain vertex layout, the mesh builder that turns a maze
//! grid into triangles, and the traits through which the game drives an external
//! engine. No GPU work happens here; the engine uploads [`terrain::Mesh`] bytes itself.

/// Entity, camera and HUD traits implemented by the engine.
pub mod scene;
/// Maze grid to triangle mesh conversion.
pub mod terrain;
/// Vertex layout shared with the GPU pipeline.
pub mod vertex;

pub use scene::{CameraPose, Collider, EntityId, EntitySpec, Hud, Model, Outcome, Scene};
pub use terrain::{Mesh, MeshBuilder};
pub use vertex::Vertex;
