// ============================================
// GPU Module - Изометрическая тайловая сетка
// ============================================
// Разреженное хранилище чанков, JSON-документ
// и рендер мира/выделения на wgpu

pub mod terrain;
pub mod render;
pub mod save;
pub mod core;

pub use core::app::run;
