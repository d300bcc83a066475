pub mod gpu;

pub use gpu::core::config::{TileRendererConfig, CHUNK_SIZE};
pub use gpu::render::{IsometricView, ProceduralAssets, TileAssets, TileRenderer, WorldToView};
pub use gpu::save::{ChunkDocument, ChunkDocumentError};
pub use gpu::terrain::{Chunk, ChunkCoord, ChunkStore, ResourceError};
