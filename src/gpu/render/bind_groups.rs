use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::gpu::core::config::{TileRendererConfig, DECOR_PRIMARY, DECOR_SECONDARY};
use crate::gpu::terrain::{gpu::create_chunk_layout, ResourceError};

use super::assets::{DecorTexture, TileAssets};
use super::projection::{select_line_width, tex_morph, world_line_width};
use super::uniforms::{GridUniform, SelectUniform};

pub struct TileBindGroupLayouts {
    /// group(0): per-chunk uniform + текстура чанка + сэмплер
    pub chunk: Arc<wgpu::BindGroupLayout>,
    /// group(1) прохода мира
    pub world: wgpu::BindGroupLayout,
    /// group(1) прохода выделения
    pub select: wgpu::BindGroupLayout,
}

impl TileBindGroupLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let chunk = Arc::new(create_chunk_layout(device));

        let decor_texture = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let world = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Tile World Layout"),
            entries: &[
                uniform_entry(0),
                decor_texture(1),
                decor_texture(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let select = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Tile Select Layout"),
            entries: &[uniform_entry(0)],
        });

        Self { chunk, world, select }
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Ресурсы прохода мира. Декоративные текстуры и сэмплер живут в bind group.
pub struct WorldPassResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl WorldPassResources {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        assets: &dyn TileAssets,
        config: &TileRendererConfig,
    ) -> Result<Self, ResourceError> {
        let primary = DecorTexture::load(device, queue, assets, DECOR_PRIMARY)?;
        let secondary = DecorTexture::load(device, queue, assets, DECOR_SECONDARY)?;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tile World Uniforms"),
            contents: bytemuck::cast_slice(&[GridUniform::new(
                tex_morph(),
                [1.0; 4],
                world_line_width(1.0),
                config.texture_scale,
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Трава тайлится: repeat + linear
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Decor Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Tile World BG"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&primary.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&secondary.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            uniform_buffer,
            bind_group,
        })
    }
}

pub struct SelectPassResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl SelectPassResources {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, config: &TileRendererConfig) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tile Select Uniforms"),
            contents: bytemuck::cast_slice(&[SelectUniform::new(
                tex_morph(),
                config.select_empty_color,
                config.select_fill_color,
                select_line_width(1.0),
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Tile Select BG"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            uniform_buffer,
            bind_group,
        }
    }
}
