use bytemuck::{Pod, Zeroable};
use ultraviolet::{Mat4, Vec2};

use crate::gpu::core::config::{CHUNK_SIZE, TILE_RATIO};

/// Per-chunk uniform: смещённая матрица и сдвиг декоративной текстуры
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ChunkUniform {
    pub matrix: [[f32; 4]; 4],
    pub texture_offset: [f32; 2],
    pub _pad: [f32; 2],
}

impl ChunkUniform {
    pub fn new(matrix: Mat4, texture_offset: Vec2) -> Self {
        Self {
            matrix: matrix.into(),
            texture_offset: [texture_offset.x, texture_offset.y],
            _pad: [0.0; 2],
        }
    }
}

impl Default for ChunkUniform {
    fn default() -> Self {
        Self::new(Mat4::identity(), Vec2::zero())
    }
}

/// Общие параметры прохода мира
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GridUniform {
    pub tex_morph: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub vert_scale: f32,
    pub num_tiles: f32,
    pub line_width: f32,
    pub texture_scale: f32,
}

impl GridUniform {
    pub fn new(tex_morph: Mat4, color: [f32; 4], line_width: f32, texture_scale: f32) -> Self {
        Self {
            tex_morph: tex_morph.into(),
            color,
            vert_scale: TILE_RATIO,
            num_tiles: CHUNK_SIZE as f32,
            line_width,
            texture_scale,
        }
    }
}

/// Общие параметры прохода выделения
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SelectUniform {
    pub tex_morph: [[f32; 4]; 4],
    pub empty_color: [f32; 4],
    pub fill_color: [f32; 4],
    pub vert_scale: f32,
    pub num_tiles: f32,
    pub line_width: f32,
    pub _pad: f32,
}

impl SelectUniform {
    pub fn new(tex_morph: Mat4, empty_color: [f32; 4], fill_color: [f32; 4], line_width: f32) -> Self {
        Self {
            tex_morph: tex_morph.into(),
            empty_color,
            fill_color,
            vert_scale: TILE_RATIO,
            num_tiles: CHUNK_SIZE as f32,
            line_width,
            _pad: 0.0,
        }
    }
}
