// ============================================
// GPU Chunk Cache - Координата чанка -> текстура
// ============================================

use std::collections::HashMap;

use crate::gpu::terrain::cache::ChunkCoord;
use crate::gpu::terrain::tile::Chunk;
use super::backend::TextureBackend;
use super::error::ResourceError;

/// Как кэш реагирует на `refresh`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// Копит текстуры между кадрами (мир)
    Accumulate,
    /// Полностью пересобирается на каждый вызов (выделение)
    Rebuild,
}

/// Кэш GPU текстур чанков.
///
/// Одна координата - не больше одного хэндла. Повторная сборка той же
/// координаты перезаливает данные в существующий хэндл.
/// После неудачного `build_many` состояние кэша не определено, перед
/// повторным использованием нужен `clear()`.
pub struct GpuChunkCache<B: TextureBackend> {
    backend: B,
    entries: HashMap<ChunkCoord, B::Texture>,
    policy: CachePolicy,
    label: &'static str,
}

impl<B: TextureBackend> GpuChunkCache<B> {
    pub fn new(backend: B, policy: CachePolicy, label: &'static str) -> Self {
        Self {
            backend,
            entries: HashMap::with_capacity(256),
            policy,
            label,
        }
    }

    /// Загружает чанк на GPU (создаёт или перезаливает текстуру)
    pub fn build(&mut self, chunk: &Chunk) -> Result<(), ResourceError> {
        let coord = chunk.coord();
        match self.entries.get_mut(&coord) {
            Some(texture) => self.backend.upload(texture, chunk)?,
            None => {
                let mut texture = self.backend.allocate(coord)?;
                if let Err(e) = self.backend.upload(&mut texture, chunk) {
                    self.backend.release(texture);
                    return Err(e);
                }
                self.entries.insert(coord, texture);
            }
        }
        log::debug!("{} cache: built chunk {}", self.label, coord);
        Ok(())
    }

    /// Очистить кэш и собрать заново из списка
    pub fn build_many<'a>(&mut self, chunks: impl IntoIterator<Item = &'a Chunk>) -> Result<(), ResourceError> {
        self.clear();
        for chunk in chunks {
            self.build(chunk)?;
        }
        Ok(())
    }

    /// Применить политику кэша к набору чанков
    pub fn refresh<'a>(&mut self, chunks: impl IntoIterator<Item = &'a Chunk>) -> Result<(), ResourceError> {
        match self.policy {
            CachePolicy::Accumulate => {
                for chunk in chunks {
                    self.build(chunk)?;
                }
                Ok(())
            }
            CachePolicy::Rebuild => self.build_many(chunks),
        }
    }

    /// Освободить все текстуры
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let released = self.entries.len();
        for (_, texture) in self.entries.drain() {
            self.backend.release(texture);
        }
        log::debug!("{} cache: released {} textures", self.label, released);
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&B::Texture> {
        self.entries.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Порядок обхода не определён
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &B::Texture)> {
        self.entries.iter().map(|(coord, texture)| (*coord, texture))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TextureBackend> Drop for GpuChunkCache<B> {
    fn drop(&mut self) {
        self.clear();
    }
}
