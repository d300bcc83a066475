// ============================================
// Chunk - Блок 16x16 байтовых тайлов
// ============================================

use crate::gpu::core::config::{CHUNK_CELLS, CHUNK_SIZE};
use crate::gpu::terrain::cache::ChunkCoord;

/// Индекс ячейки внутри чанка.
/// Порядок совпадает с массивом `data` в документе: (4, 3) -> 4 * 16 + 3.
#[inline]
pub fn local_index(lx: usize, ly: usize) -> usize {
    lx * CHUNK_SIZE as usize + ly
}

/// Чанк тайлов. Владеет только своими байтами, координата = ключ в хранилище.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    cells: [u8; CHUNK_CELLS],
}

impl Chunk {
    /// Пустой (заполненный нулями) чанк
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            cells: [0; CHUNK_CELLS],
        }
    }

    /// Чанк из готовых данных (используется при загрузке документа)
    pub fn from_cells(coord: ChunkCoord, cells: [u8; CHUNK_CELLS]) -> Self {
        Self { coord, cells }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn get(&self, lx: usize, ly: usize) -> u8 {
        self.cells[local_index(lx, ly)]
    }

    pub fn set(&mut self, value: u8, lx: usize, ly: usize) {
        self.cells[local_index(lx, ly)] = value;
    }

    /// Сырые байты в порядке `local_index` (так они уходят в текстуру)
    pub fn cells(&self) -> &[u8; CHUNK_CELLS] {
        &self.cells
    }

    /// Есть ли хоть один ненулевой тайл
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }
}
