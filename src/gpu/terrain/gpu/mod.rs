// ============================================
// Terrain GPU - Кэши текстур чанков
// ============================================

mod backend;
mod chunk;
mod error;
mod manager;

pub use backend::TextureBackend;
pub use chunk::{ChunkTexture, WgpuTextureBackend, create_chunk_layout, create_chunk_sampler};
pub use error::{ResourceError, with_error_scope};
pub use manager::{GpuChunkCache, CachePolicy};
