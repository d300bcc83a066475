// ============================================
// Texture Backend - Где живут текстуры чанков
// ============================================

use crate::gpu::terrain::cache::ChunkCoord;
use crate::gpu::terrain::tile::Chunk;
use super::error::ResourceError;

/// Источник GPU текстур для `GpuChunkCache`.
///
/// Кэш владеет хэндлами эксклюзивно: `allocate` создаёт, `upload`
/// перезаписывает содержимое существующего хэндла, `release` освобождает.
pub trait TextureBackend {
    type Texture;

    /// Выделить хранилище SIZE x SIZE под чанк
    fn allocate(&mut self, coord: ChunkCoord) -> Result<Self::Texture, ResourceError>;

    /// Залить байты чанка в уже выделенную текстуру
    fn upload(&mut self, texture: &mut Self::Texture, chunk: &Chunk) -> Result<(), ResourceError>;

    fn release(&mut self, texture: Self::Texture);
}
