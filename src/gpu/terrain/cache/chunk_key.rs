// ============================================
// Chunk Coord - Идентификатор чанка
// ============================================

use std::fmt;

use crate::gpu::core::config::CHUNK_SIZE;

/// Координата чанка: floor(tile / CHUNK_SIZE) по каждой оси
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Чанк, которому принадлежит тайл (x, y).
    /// Для отрицательных координат - математический floor, не усечение.
    pub fn from_tile(x: i32, y: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            y: y.div_euclid(CHUNK_SIZE),
        }
    }

    /// Локальное смещение тайла внутри своего чанка, всегда в [0, CHUNK_SIZE)
    pub fn local_offset(x: i32, y: i32) -> (usize, usize) {
        (
            x.rem_euclid(CHUNK_SIZE) as usize,
            y.rem_euclid(CHUNK_SIZE) as usize,
        )
    }

    /// Первый тайл чанка в мировых координатах
    pub fn origin_tile(&self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.y * CHUNK_SIZE)
    }
}

/// Формат ключа документа: "(cx, cy)"
impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_division_for_negative_tiles() {
        assert_eq!(ChunkCoord::from_tile(-1, -1), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::local_offset(-1, -1), (15, 15));

        assert_eq!(ChunkCoord::from_tile(-16, -17), ChunkCoord::new(-1, -2));
        assert_eq!(ChunkCoord::local_offset(-16, -17), (0, 15));
    }

    #[test]
    fn test_positive_tiles() {
        assert_eq!(ChunkCoord::from_tile(0, 15), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_tile(20, 3), ChunkCoord::new(1, 0));
        assert_eq!(ChunkCoord::local_offset(20, 3), (4, 3));
    }

    #[test]
    fn test_matches_float_floor() {
        for x in -70..70 {
            let expected = (x as f64 / CHUNK_SIZE as f64).floor() as i32;
            assert_eq!(ChunkCoord::from_tile(x, 0).x, expected, "tile {}", x);
        }
    }

    #[test]
    fn test_display_key_format() {
        assert_eq!(ChunkCoord::new(1, 0).to_string(), "(1, 0)");
        assert_eq!(ChunkCoord::new(-3, 12).to_string(), "(-3, 12)");
        assert_eq!(ChunkCoord::new(-2, 5).origin_tile(), (-32, 80));
    }
}
