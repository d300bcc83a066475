// ============================================
// Decor Assets - Декоративные текстуры прохода мира
// ============================================
// Картинки приходят от поставщика ассетов по имени,
// встроенный ProceduralAssets генерирует траву без файлов.

use crate::gpu::core::config::{DECOR_PRIMARY, DECOR_SECONDARY};
use crate::gpu::terrain::ResourceError;

/// RGBA8 картинка
#[derive(Debug, Clone)]
pub struct DecorImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecorImage {
    fn validate(&self, name: &str) -> Result<(), ResourceError> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.width == 0 || self.height == 0 || self.rgba.len() != expected {
            return Err(ResourceError::InvalidAsset {
                name: name.to_string(),
                reason: format!(
                    "{}x{} image with {} bytes (expected {})",
                    self.width,
                    self.height,
                    self.rgba.len(),
                    expected
                ),
            });
        }
        Ok(())
    }
}

/// Поставщик ассетов
pub trait TileAssets {
    fn decor_image(&self, name: &str) -> Option<DecorImage>;
}

/// Процедурная трава
#[derive(Debug, Clone, Copy)]
pub struct ProceduralAssets {
    pub size: u32,
}

impl Default for ProceduralAssets {
    fn default() -> Self {
        Self { size: 64 }
    }
}

impl TileAssets for ProceduralAssets {
    fn decor_image(&self, name: &str) -> Option<DecorImage> {
        let (light, dark, salt) = match name {
            DECOR_PRIMARY => ([96, 160, 72, 255], [58, 112, 44, 255], 0),
            DECOR_SECONDARY => ([120, 150, 64, 255], [70, 96, 40, 255], 7919),
            _ => return None,
        };

        let size = self.size;
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                // Травинки: вертикальный градиент поверх шума
                let noise = simple_hash(x + salt, y / 2 + salt) as f32 / 255.0;
                let blade = (y % 8) as f32 / 8.0;
                rgba.extend_from_slice(&lerp_color(light, dark, (noise * 0.7 + blade * 0.3).min(1.0)));
            }
        }

        Some(DecorImage { width: size, height: size, rgba })
    }
}

/// Декоративная текстура на GPU
pub struct DecorTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DecorTexture {
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        assets: &dyn TileAssets,
        name: &str,
    ) -> Result<Self, ResourceError> {
        let image = assets.decor_image(name).ok_or_else(|| ResourceError::MissingAsset {
            name: name.to_string(),
        })?;
        image.validate(name)?;

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { texture, view })
    }
}

/// Простой хеш для процедурных текстур
fn simple_hash(x: u32, y: u32) -> u8 {
    let n = x.wrapping_mul(374761393).wrapping_add(y.wrapping_mul(668265263));
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    ((n ^ (n >> 16)) & 0xFF) as u8
}

/// Линейная интерполяция цветов
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    [
        (a[0] as f32 * (1.0 - t) + b[0] as f32 * t) as u8,
        (a[1] as f32 * (1.0 - t) + b[1] as f32 * t) as u8,
        (a[2] as f32 * (1.0 - t) + b[2] as f32 * t) as u8,
        255,
    ]
}
