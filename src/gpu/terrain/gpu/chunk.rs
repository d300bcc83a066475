// ============================================
// GPU Chunk - Текстура чанка на GPU
// ============================================

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::gpu::core::config::CHUNK_SIZE;
use crate::gpu::render::uniforms::ChunkUniform;
use crate::gpu::terrain::cache::ChunkCoord;
use crate::gpu::terrain::tile::Chunk;
use super::backend::TextureBackend;
use super::error::{with_error_scope, ResourceError};

const CHUNK_EXTENT: wgpu::Extent3d = wgpu::Extent3d {
    width: CHUNK_SIZE as u32,
    height: CHUNK_SIZE as u32,
    depth_or_array_layers: 1,
};

/// GPU ресурсы одного чанка: одноканальная текстура + per-chunk uniform
pub struct ChunkTexture {
    pub coord: ChunkCoord,
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// Bind group layout (group 0) общий для обоих проходов
pub fn create_chunk_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Chunk Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Nearest-neighbor сэмплер с border clamp (если устройство умеет)
pub fn create_chunk_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    let border = device
        .features()
        .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER);
    if !border {
        log::warn!("ADDRESS_MODE_CLAMP_TO_BORDER not supported, chunk textures fall back to ClampToEdge");
    }
    let address_mode = if border {
        wgpu::AddressMode::ClampToBorder
    } else {
        wgpu::AddressMode::ClampToEdge
    };

    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Chunk Sampler"),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        border_color: border.then_some(wgpu::SamplerBorderColor::TransparentBlack),
        ..Default::default()
    })
}

/// Бэкенд на wgpu: одна текстура R8Unorm на чанк
pub struct WgpuTextureBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    layout: Arc<wgpu::BindGroupLayout>,
    sampler: Arc<wgpu::Sampler>,
    label: &'static str,
}

impl WgpuTextureBackend {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        layout: Arc<wgpu::BindGroupLayout>,
        sampler: Arc<wgpu::Sampler>,
        label: &'static str,
    ) -> Self {
        Self {
            device,
            queue,
            layout,
            sampler,
            label,
        }
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

impl TextureBackend for WgpuTextureBackend {
    type Texture = ChunkTexture;

    fn allocate(&mut self, coord: ChunkCoord) -> Result<ChunkTexture, ResourceError> {
        let device = &self.device;
        let label = self.label;

        with_error_scope(
            device,
            || format!("allocating {} texture for chunk {}", label, coord),
            || {
                let texture = device.create_texture(&wgpu::TextureDescriptor {
                    label: Some(&format!("{} Chunk {} Texture", label, coord)),
                    size: CHUNK_EXTENT,
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: wgpu::TextureFormat::R8Unorm,
                    usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                    view_formats: &[],
                });
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

                let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Chunk {} Uniforms", label, coord)),
                    contents: bytemuck::cast_slice(&[ChunkUniform::default()]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });

                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{} Chunk {} BG", label, coord)),
                    layout: &self.layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(&view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                    ],
                });

                ChunkTexture {
                    coord,
                    texture,
                    view,
                    uniform_buffer,
                    bind_group,
                }
            },
        )
    }

    fn upload(&mut self, texture: &mut ChunkTexture, chunk: &Chunk) -> Result<(), ResourceError> {
        let coord = chunk.coord();
        let label = self.label;

        with_error_scope(
            &self.device,
            || format!("uploading {} chunk {}", label, coord),
            || {
                // Перезаписываем существующее хранилище, хэндл не меняется
                self.queue.write_texture(
                    wgpu::TexelCopyTextureInfo {
                        texture: &texture.texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    chunk.cells(),
                    wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(CHUNK_SIZE as u32),
                        rows_per_image: Some(CHUNK_SIZE as u32),
                    },
                    CHUNK_EXTENT,
                );
            },
        )
    }

    fn release(&mut self, texture: ChunkTexture) {
        texture.texture.destroy();
        texture.uniform_buffer.destroy();
    }
}
