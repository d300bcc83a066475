// ============================================
// Terrain Module - Разреженный мир из тайловых чанков
// ============================================

pub mod cache;
pub mod gpu;
pub mod tile;

// Re-exports
pub use cache::ChunkCoord;
pub use tile::{Chunk, ChunkStore, local_index};
pub use gpu::{GpuChunkCache, CachePolicy, TextureBackend, WgpuTextureBackend, ChunkTexture, ResourceError};
