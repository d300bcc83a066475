use super::bind_groups::TileBindGroupLayouts;
use super::geometry::TileVertex;

pub struct TilePipelines {
    pub world: wgpu::RenderPipeline,
    pub select: wgpu::RenderPipeline,
}

impl TilePipelines {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, layouts: &TileBindGroupLayouts) -> Self {
        let world_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Tile Grid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tile_grid.wgsl").into()),
        });

        let select_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Tile Select Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tile_select.wgsl").into()),
        });

        let world_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Tile World Pipeline Layout"),
            bind_group_layouts: &[&*layouts.chunk, &layouts.world],
            push_constant_ranges: &[],
        });

        let select_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Tile Select Pipeline Layout"),
            bind_group_layouts: &[&*layouts.chunk, &layouts.select],
            push_constant_ranges: &[],
        });

        let world = create_tile_pipeline(device, "Tile World Pipeline", &world_layout, &world_shader, color_format);
        let select = create_tile_pipeline(device, "Tile Select Pipeline", &select_layout, &select_shader, color_format);

        Self { world, select }
    }
}

/// Оба прохода: TriangleList без depth, альфа-блендинг
fn create_tile_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[TileVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
