// ============================================
// Chunk Quad - Ромб чанка (6 вершин, 2 треугольника)
// ============================================

use std::f32::consts::SQRT_2;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::gpu::core::config::{CHUNK_SIZE, TILE_RATIO};

/// Вершина тайловой сетки (позиция в view space + texcoord)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TileVertex {
    pub position: [f32; 2],
    pub tex: [f32; 2],
}

impl TileVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Вершины ромба чанка. `overestimate` растягивает и позиции, и texcoord
/// (1.0 для мира, 21/20 для выделения).
pub fn chunk_quad(overestimate: f32) -> [TileVertex; 6] {
    let sx = CHUNK_SIZE as f32 / SQRT_2 * overestimate;
    let sy = TILE_RATIO * CHUNK_SIZE as f32 / SQRT_2 * overestimate;
    let t = 0.5 * overestimate;

    let v = |x: f32, y: f32, u: f32, w: f32| TileVertex { position: [x, y], tex: [u, w] };
    [
        v(0.0, -sy, -t, -t),
        v(-sx, 0.0, t, -t),
        v(0.0, sy, t, t),
        v(0.0, sy, t, t),
        v(sx, 0.0, -t, t),
        v(0.0, -sy, -t, -t),
    ]
}

/// Статический вершинный буфер одного прохода
pub struct QuadGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl QuadGeometry {
    pub fn new(device: &wgpu::Device, overestimate: f32, label: &str) -> Self {
        let vertices = chunk_quad(overestimate);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::core::config::SELECT_OVERESTIMATE;

    fn extent(vertices: &[TileVertex]) -> ([f32; 2], [f32; 2]) {
        let mut pos = [0.0f32; 2];
        let mut tex = [0.0f32; 2];
        for v in vertices {
            for i in 0..2 {
                pos[i] = pos[i].max(v.position[i].abs());
                tex[i] = tex[i].max(v.tex[i].abs());
            }
        }
        (pos, tex)
    }

    #[test]
    fn test_world_quad_shape() {
        let quad = chunk_quad(1.0);
        assert_eq!(quad.len(), 6);
        // Два треугольника замыкаются на первой вершине
        assert_eq!(quad[0], quad[5]);
        assert_eq!(quad[2], quad[3]);

        let (pos, tex) = extent(&quad);
        assert!((pos[0] - 16.0 / SQRT_2).abs() < 1e-4);
        assert!((pos[1] - 0.6 * 16.0 / SQRT_2).abs() < 1e-4);
        assert_eq!(tex, [0.5, 0.5]);
    }

    #[test]
    fn test_selection_quad_is_oversized() {
        let (world_pos, world_tex) = extent(&chunk_quad(1.0));
        let (pos, tex) = extent(&chunk_quad(SELECT_OVERESTIMATE));

        for i in 0..2 {
            assert!((pos[i] - world_pos[i] * 1.05).abs() < 1e-4);
            assert!((tex[i] - world_tex[i] * 1.05).abs() < 1e-4);
        }
    }
}
