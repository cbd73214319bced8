//! Vertex layout of the maze terrain mesh.
//!
//! This module provides the [`Vertex`] struct handed to the rendering collaborator as raw
//! bytes, together with the matching [`wgpu::VertexBufferLayout`].

/// Material index for open floor.
pub const MATERIAL_PATH: u32 = 0;
/// Material index for wall tops and sides.
pub const MATERIAL_WALL: u32 = 1;

/// Vertex data for the maze terrain.
///
/// Each vertex contains:
/// - `position`: 3D position in world space.
/// - `color`: RGBA color (as 4 normalized u8 values).
/// - `uv`: texture coordinate within its quad.
/// - `material`: Material type (0 = path, 1 = wall).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position in world space.
    pub position: [f32; 3],
    /// RGBA color (normalized 0-255).
    pub color: [u8; 4],
    /// Texture coordinate, `(0,0)` to `(1,1)` across each quad.
    pub uv: [f32; 2],
    /// Material type (0 = path, 1 = wall).
    pub material: u32,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        // 4 bytes read as normalized floats in the shader
        wgpu::VertexAttribute {
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Unorm8x4,
        },
        wgpu::VertexAttribute {
            offset: (std::mem::size_of::<[f32; 3]>() + std::mem::size_of::<[u8; 4]>())
                as wgpu::BufferAddress,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: (std::mem::size_of::<[f32; 3]>()
                + std::mem::size_of::<[u8; 4]>()
                + std::mem::size_of::<[f32; 2]>()) as wgpu::BufferAddress,
            shader_location: 3,
            format: wgpu::VertexFormat::Uint32,
        },
    ];

    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    ///
    /// This describes the memory layout of [`Vertex`] for the GPU.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 28);
        assert_eq!(layout.attributes.len(), 4);
        assert_eq!(layout.attributes[3].offset, 24);
    }

    #[test]
    fn test_vertex_casts_to_bytes() {
        let vertex = Vertex {
            position: [1.0, 2.0, 3.0],
            color: [10, 20, 30, 255],
            uv: [0.0, 1.0],
            material: MATERIAL_WALL,
        };
        let bytes = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[12..16], &[10, 20, 30, 255]);
    }
}
