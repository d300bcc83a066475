// ============================================
// Tile Module - Разреженная сетка тайлов
// ============================================

mod chunk;
mod store;

pub use chunk::{Chunk, local_index};
pub use store::ChunkStore;
