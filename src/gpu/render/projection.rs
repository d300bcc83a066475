// ============================================
// Projection - Изометрическая математика тайлов
// ============================================

use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_4, SQRT_2};

use ultraviolet::{Mat4, Vec2, Vec3, Vec4};

use crate::gpu::core::config::{CHUNK_SIZE, TILE_RATIO, TILE_WIDTH};
use crate::gpu::terrain::ChunkCoord;

/// Преобразование мировых координат тайлов в view space (поставляет камера)
pub trait WorldToView {
    fn world_to_view(&self, world: Vec2) -> Vec2;
}

/// Изометрия, согласованная с ромбом геометрии чанка:
/// мир поворачивается на 45° и сжимается по вертикали в TILE_RATIO раз.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsometricView;

impl IsometricView {
    pub fn view_to_world(&self, view: Vec2) -> Vec2 {
        let diff = view.x * SQRT_2;
        let sum = view.y * SQRT_2 / TILE_RATIO;
        Vec2::new((sum + diff) * 0.5, (sum - diff) * 0.5)
    }

    /// Тайл под курсором (floor, не усечение)
    pub fn pick_tile(&self, view: Vec2) -> (i32, i32) {
        let world = self.view_to_world(view);
        (world.x.floor() as i32, world.y.floor() as i32)
    }
}

impl WorldToView for IsometricView {
    fn world_to_view(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            (world.x - world.y) * FRAC_1_SQRT_2,
            (world.x + world.y) * FRAC_1_SQRT_2 * TILE_RATIO,
        )
    }
}

/// scale(-√2, TILE_RATIO·√2, 0) * rotate(45°, z):
/// квадратная текстура тайла -> ромб на экране
pub fn tex_morph() -> Mat4 {
    let scale = Mat4::new(
        Vec4::new(-SQRT_2, 0.0, 0.0, 0.0),
        Vec4::new(0.0, TILE_RATIO * SQRT_2, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );
    let (s, c) = FRAC_PI_4.sin_cos();
    let rotation = Mat4::new(
        Vec4::new(c, s, 0.0, 0.0),
        Vec4::new(-s, c, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );
    scale * rotation
}

/// Центр чанка в мировых координатах тайлов
pub fn chunk_center(coord: ChunkCoord) -> Vec2 {
    Vec2::new(
        (coord.x as f32 + 0.5) * CHUNK_SIZE as f32,
        (coord.y as f32 + 0.5) * CHUNK_SIZE as f32,
    )
}

/// Диагональный сдвиг декоративной текстуры, чтобы соседние чанки стыковались
pub fn texture_offset(coord: ChunkCoord) -> Vec2 {
    let diagonal = (coord.x + coord.y) as f32;
    Vec2::new(diagonal, diagonal * TILE_RATIO)
}

/// Матрица прохода для одного чанка: view_proj * translate(offset)
pub fn chunk_matrix(view_projection: Mat4, view_offset: Vec2) -> Mat4 {
    view_projection * Mat4::from_translation(Vec3::new(view_offset.x, view_offset.y, 0.0))
}

/// Толщина линий сетки мира. Сейчас умножается на ноль и ничего не рисует.
pub fn world_line_width(view_scale: f32) -> f32 {
    1.0 / CHUNK_SIZE as f32 / TILE_WIDTH / view_scale * 0.0
}

/// Толщина рамки выделения в texcoord-единицах
pub fn select_line_width(view_scale: f32) -> f32 {
    1.0 / CHUNK_SIZE as f32 / TILE_WIDTH / view_scale * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_tex_morph_maps_unit_x() {
        let v = tex_morph() * Vec4::new(1.0, 0.0, 5.0, 1.0);
        assert!(close(v.x, -1.0), "x = {}", v.x);
        assert!(close(v.y, TILE_RATIO), "y = {}", v.y);
        // Z схлопнут
        assert!(close(v.z, 0.0));
        assert!(close(v.w, 1.0));
    }

    #[test]
    fn test_tex_morph_maps_unit_y() {
        let v = tex_morph() * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!(close(v.x, 1.0), "x = {}", v.x);
        assert!(close(v.y, TILE_RATIO), "y = {}", v.y);
    }

    #[test]
    fn test_chunk_center_and_offset() {
        assert_eq!(chunk_center(ChunkCoord::new(0, 0)), Vec2::new(8.0, 8.0));
        assert_eq!(chunk_center(ChunkCoord::new(-1, 2)), Vec2::new(-8.0, 40.0));

        let offset = texture_offset(ChunkCoord::new(2, 3));
        assert!(close(offset.x, 5.0));
        assert!(close(offset.y, 3.0));
        // Чанки на одной антидиагонали получают одинаковый сдвиг
        assert_eq!(texture_offset(ChunkCoord::new(4, -4)), texture_offset(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn test_line_widths() {
        assert_eq!(world_line_width(1.0), 0.0);
        assert_eq!(world_line_width(3.5), 0.0);
        assert!(close(select_line_width(1.0), 0.125));
        assert!(close(select_line_width(2.0), 0.0625));
    }

    #[test]
    fn test_chunk_matrix_translates() {
        let m = chunk_matrix(Mat4::identity(), Vec2::new(3.0, -2.0));
        let p = m * Vec4::new(1.0, 1.0, 0.0, 1.0);
        assert!(close(p.x, 4.0));
        assert!(close(p.y, -1.0));
    }

    #[test]
    fn test_isometric_chunk_corners_match_quad() {
        let view = IsometricView;
        let half = CHUNK_SIZE as f32 / 2.0;
        // Угол (+half, -half) относительно центра -> правая вершина ромба
        let right = view.world_to_view(Vec2::new(half, -half));
        assert!(close(right.x, CHUNK_SIZE as f32 / SQRT_2));
        assert!(close(right.y, 0.0));

        let top = view.world_to_view(Vec2::new(half, half));
        assert!(close(top.x, 0.0));
        assert!(close(top.y, TILE_RATIO * CHUNK_SIZE as f32 / SQRT_2));
    }

    #[test]
    fn test_pick_tile_inverts_projection() {
        let view = IsometricView;
        for &(x, y) in &[(0, 0), (-1, -1), (20, 3), (-37, 12)] {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            assert_eq!(view.pick_tile(view.world_to_view(center)), (x, y));
        }
    }
}
