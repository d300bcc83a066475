// ============================================
// Config - Константы и настройки рендера тайлов
// ============================================

/// Сторона чанка в тайлах
pub const CHUNK_SIZE: i32 = 16;
/// Количество ячеек в чанке (SIZE * SIZE)
pub const CHUNK_CELLS: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Видимая высота тайла / ширина
pub const TILE_RATIO: f32 = 0.6;
pub const TILE_WIDTH: f32 = 1.0;

/// Во сколько раз геометрия выделения больше чанка (чтобы не было швов)
pub const SELECT_OVERESTIMATE: f32 = 21.0 / 20.0;

/// Масштаб декоративных текстур в проходе мира
pub const DECOR_TEXTURE_SCALE: f32 = 2.0;

/// Имена декоративных текстур у поставщика ассетов
pub const DECOR_PRIMARY: &str = "grass.png";
pub const DECOR_SECONDARY: &str = "mock grass 2.png";

pub const SELECT_EMPTY_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
pub const SELECT_FILL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.2];

/// Настройки рендерера, собираются один раз при создании
#[derive(Debug, Clone, Copy)]
pub struct TileRendererConfig {
    /// Формат цели рендера (surface или offscreen)
    pub color_format: wgpu::TextureFormat,
    pub texture_scale: f32,
    pub select_empty_color: [f32; 4],
    pub select_fill_color: [f32; 4],
}

impl TileRendererConfig {
    pub fn new(color_format: wgpu::TextureFormat) -> Self {
        Self {
            color_format,
            ..Default::default()
        }
    }
}

impl Default for TileRendererConfig {
    fn default() -> Self {
        Self {
            color_format: wgpu::TextureFormat::Rgba8UnormSrgb,
            texture_scale: DECOR_TEXTURE_SCALE,
            select_empty_color: SELECT_EMPTY_COLOR,
            select_fill_color: SELECT_FILL_COLOR,
        }
    }
}
