// ============================================
// Render Module - Отрисовка тайловой сетки
// ============================================

pub mod uniforms;
mod pipelines;
mod bind_groups;
mod geometry;
mod assets;
mod projection;
mod context;
mod tile_renderer;

pub use assets::{DecorImage, DecorTexture, ProceduralAssets, TileAssets};
pub use context::init_headless;
pub use geometry::{chunk_quad, QuadGeometry, TileVertex};
pub use projection::{
    chunk_center, chunk_matrix, select_line_width, tex_morph, texture_offset, world_line_width,
    IsometricView, WorldToView,
};
pub use tile_renderer::TileRenderer;
