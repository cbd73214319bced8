//! Terrain mesh synthesis from a maze grid.
//!
//! Every cell contributes a flat top quad, raised to the wall height for walls. Wall
//! cells additionally get vertical side quads down to the path height, but only on the
//! sides that face an open cell or the edge of the maze; faces between two walls are
//! never visible and are skipped.
//!
//! The maze is centred on the origin: cell `(row, col)` spans
//! `x ∈ [(col - D/2) * cell, (col - D/2 + 1) * cell]` and likewise for `z` with `row`.

use super::vertex::{MATERIAL_PATH, MATERIAL_WALL, Vertex};
use crate::config::GameConfig;
use crate::maze::{Cell, CellKind, Grid};

/// Texture coordinates shared by every quad, in vertex order.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Triangle list of a quad relative to its first vertex.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Triangle mesh ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes laid out as described by [`Vertex::desc`].
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn push_quad(&mut self, corners: [[f32; 3]; 4], color: [u8; 4], material: u32) {
        let start = self.vertices.len() as u32;
        for (position, uv) in corners.into_iter().zip(QUAD_UVS) {
            self.vertices.push(Vertex {
                position,
                color,
                uv,
                material,
            });
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| start + i));
    }
}

/// Builds a [`Mesh`] for a grid. Holds only the dimensions and colours, so one builder
/// can be reused across games.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    cell_size: f32,
    wall_height: f32,
    path_height: f32,
    path_color: [u8; 4],
    wall_color: [u8; 4],
}

impl MeshBuilder {
    pub fn new(
        cell_size: f32,
        wall_height: f32,
        path_height: f32,
        path_color: [u8; 4],
        wall_color: [u8; 4],
    ) -> Self {
        Self {
            cell_size,
            wall_height,
            path_height,
            path_color,
            wall_color,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.maze.cell_size,
            config.maze.wall_height,
            config.maze.path_height,
            config.colors.ground_path,
            config.colors.ground_wall,
        )
    }

    /// Builds the terrain. Cells are visited row by row; side faces of a wall cell are
    /// emitted in the order north (+z), south (-z), east (+x), west (-x).
    pub fn build(&self, grid: &Grid) -> Mesh {
        let d = grid.dimension();
        let half = d as f32 / 2.0;
        let c = self.cell_size;
        let ph = self.path_height;
        let mut mesh = Mesh::default();

        for row in 0..d {
            for col in 0..d {
                let is_wall = grid.get(Cell::new(row, col)) == Some(CellKind::Wall);
                let (h, color, material) = if is_wall {
                    (self.wall_height, self.wall_color, MATERIAL_WALL)
                } else {
                    (self.path_height, self.path_color, MATERIAL_PATH)
                };

                let x = (col as f32 - half) * c;
                let z = (row as f32 - half) * c;

                mesh.push_quad(
                    [[x, h, z], [x + c, h, z], [x + c, h, z + c], [x, h, z + c]],
                    color,
                    material,
                );

                if !is_wall {
                    continue;
                }

                let open = |r: usize, k: usize| grid.is_path(Cell::new(r, k));

                if row == d - 1 || open(row + 1, col) {
                    mesh.push_quad(
                        [
                            [x, ph, z + c],
                            [x + c, ph, z + c],
                            [x + c, h, z + c],
                            [x, h, z + c],
                        ],
                        color,
                        material,
                    );
                }
                if row == 0 || open(row - 1, col) {
                    mesh.push_quad(
                        [[x + c, ph, z], [x, ph, z], [x, h, z], [x + c, h, z]],
                        color,
                        material,
                    );
                }
                if col == d - 1 || open(row, col + 1) {
                    mesh.push_quad(
                        [
                            [x + c, ph, z],
                            [x + c, ph, z + c],
                            [x + c, h, z + c],
                            [x + c, h, z],
                        ],
                        color,
                        material,
                    );
                }
                if col == 0 || open(row, col - 1) {
                    mesh.push_quad(
                        [[x, ph, z + c], [x, ph, z], [x, h, z], [x, h, z + c]],
                        color,
                        material,
                    );
                }
            }
        }

        log::debug!(
            "built terrain mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn builder() -> MeshBuilder {
        MeshBuilder::new(1.0, 1.0, 0.0, [200, 200, 200, 255], [60, 60, 60, 255])
    }

    #[test]
    fn test_solid_grid_only_has_boundary_sides() {
        let d = 5;
        let mesh = builder().build(&Grid::filled(d, CellKind::Wall));
        let quads = d * d + 4 * d;
        assert_eq!(mesh.vertex_count(), quads * 4);
        assert_eq!(mesh.triangle_count(), quads * 2);
    }

    /// One open cell in a 3x3: every wall shows its outer faces plus the four
    /// walls around the centre show one face each toward it.
    #[test]
    fn test_single_room_face_count() {
        let mut grid = Grid::filled(3, CellKind::Wall);
        grid.set(Cell::new(1, 1), CellKind::Path);
        let mesh = builder().build(&grid);

        assert_eq!(mesh.vertex_count(), (9 + 12 + 4) * 4);
        assert_eq!(mesh.triangle_count(), (9 + 12 + 4) * 2);

        let walls = mesh
            .vertices
            .iter()
            .filter(|v| v.material == MATERIAL_WALL)
            .count();
        assert_eq!(walls, mesh.vertex_count() - 4);
    }

    #[test]
    fn test_first_quad_is_top_of_corner_cell() {
        let mesh = builder().build(&Grid::filled(3, CellKind::Wall));
        let corners: Vec<[f32; 3]> = mesh.vertices[..4].iter().map(|v| v.position).collect();
        assert_eq!(
            corners,
            vec![
                [-1.5, 1.0, -1.5],
                [-0.5, 1.0, -1.5],
                [-0.5, 1.0, -0.5],
                [-1.5, 1.0, -0.5],
            ]
        );
        assert_eq!(&mesh.indices[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 1.0]);
    }

    /// North and south faces of the same wall wind in opposite directions.
    #[test]
    fn test_north_and_south_faces_point_away_from_each_other() {
        let mesh = builder().build(&Grid::filled(1, CellKind::Wall));
        // top, north, south, east, west
        assert_eq!(mesh.vertex_count(), 20);

        let normal_z = |quad: usize| {
            let v = &mesh.vertices[quad * 4..quad * 4 + 3];
            let e1 = [
                v[1].position[0] - v[0].position[0],
                v[1].position[1] - v[0].position[1],
            ];
            let e2 = [
                v[2].position[0] - v[0].position[0],
                v[2].position[1] - v[0].position[1],
            ];
            e1[0] * e2[1] - e1[1] * e2[0]
        };
        assert!(normal_z(1) > 0.0);
        assert!(normal_z(2) < 0.0);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let grid = MazeGenerator::generate(&mut StdRng::seed_from_u64(5), 13);
        let a = builder().build(&grid);
        let b = builder().build(&grid);
        assert_eq!(a, b);
        assert_eq!(a.vertex_bytes().len(), a.vertex_count() * 28);
        assert_eq!(a.index_bytes().len(), a.indices.len() * 4);
    }
}
