// ============================================
// Chunk Store - Разреженное хранилище чанков
// ============================================
// Арена чанков + индекс по координате. Чанки создаются лениво
// при первой записи и никогда не удаляются неявно.

use std::collections::HashMap;

use crate::gpu::terrain::cache::ChunkCoord;
use super::chunk::Chunk;

#[derive(Debug)]
pub struct ChunkStore {
    /// Арена: индексы стабильны, т.к. чанки не удаляются
    chunks: Vec<Chunk>,
    index: HashMap<ChunkCoord, usize>,

    /// Чанки, изменённые с последнего `take_dirty`
    dirty: Vec<ChunkCoord>,
    /// Флаг "уже в dirty" параллельно арене
    dirty_flags: Vec<bool>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            index: HashMap::new(),
            dirty: Vec::new(),
            dirty_flags: Vec::new(),
        }
    }

    /// Маска из набора тайлов (для выделения в редакторе)
    pub fn from_tiles(value: u8, tiles: impl IntoIterator<Item = (i32, i32)>) -> Self {
        let mut store = Self::new();
        for (x, y) in tiles {
            store.set_tile(value, x, y);
        }
        store
    }

    /// Записать тайл. Создаёт чанк, если его ещё нет.
    pub fn set_tile(&mut self, value: u8, x: i32, y: i32) -> &Chunk {
        let (lx, ly) = ChunkCoord::local_offset(x, y);
        let slot = self.slot_for(ChunkCoord::from_tile(x, y));
        self.mark_dirty(slot);
        let chunk = &mut self.chunks[slot];
        chunk.set(value, lx, ly);
        chunk
    }

    /// Прочитать тайл; 0 если чанка нет
    pub fn get_tile(&self, x: i32, y: i32) -> u8 {
        match self.index.get(&ChunkCoord::from_tile(x, y)) {
            Some(&slot) => {
                let (lx, ly) = ChunkCoord::local_offset(x, y);
                self.chunks[slot].get(lx, ly)
            }
            None => 0,
        }
    }

    /// Создать чанк для тайла (x, y), ничего не записывая.
    /// Существующий чанк не помечается грязным.
    pub fn ensure_chunk(&mut self, x: i32, y: i32) -> &Chunk {
        let coord = ChunkCoord::from_tile(x, y);
        let slot = match self.index.get(&coord) {
            Some(&slot) => slot,
            None => {
                let slot = self.push_chunk(Chunk::new(coord));
                self.mark_dirty(slot);
                slot
            }
        };
        &self.chunks[slot]
    }

    pub fn set_tile_at(&mut self, value: u8, x: f32, y: f32) -> &Chunk {
        self.set_tile(value, x.floor() as i32, y.floor() as i32)
    }

    pub fn get_tile_at(&self, x: f32, y: f32) -> u8 {
        self.get_tile(x.floor() as i32, y.floor() as i32)
    }

    /// Вставить готовый чанк, заменяя существующий с той же координатой
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        let slot = match self.index.get(&chunk.coord()) {
            Some(&slot) => {
                self.chunks[slot] = chunk;
                slot
            }
            None => self.push_chunk(chunk),
        };
        self.mark_dirty(slot);
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.index.get(&coord).map(|&slot| &self.chunks[slot])
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.iter().map(Chunk::coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Получить и очистить список грязных чанков
    pub fn take_dirty(&mut self) -> Vec<ChunkCoord> {
        for coord in &self.dirty {
            self.dirty_flags[self.index[coord]] = false;
        }
        std::mem::take(&mut self.dirty)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    fn slot_for(&mut self, coord: ChunkCoord) -> usize {
        match self.index.get(&coord) {
            Some(&slot) => slot,
            None => self.push_chunk(Chunk::new(coord)),
        }
    }

    fn push_chunk(&mut self, chunk: Chunk) -> usize {
        let slot = self.chunks.len();
        self.index.insert(chunk.coord(), slot);
        self.chunks.push(chunk);
        self.dirty_flags.push(false);
        slot
    }

    fn mark_dirty(&mut self, slot: usize) {
        if !self.dirty_flags[slot] {
            self.dirty_flags[slot] = true;
            self.dirty.push(self.chunks[slot].coord());
        }
    }
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}
