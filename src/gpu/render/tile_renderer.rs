// ============================================
// Tile Renderer - Два прохода тайловой сетки
// ============================================
// Мир: постоянный кэш текстур чанков, дозаливка по dirty-списку.
// Выделение: временный кэш, пересобирается на каждый build_select.

use std::sync::Arc;

use ultraviolet::{Mat4, Vec2};

use crate::gpu::core::config::{TileRendererConfig, SELECT_OVERESTIMATE};
use crate::gpu::terrain::gpu::create_chunk_sampler;
use crate::gpu::terrain::{
    CachePolicy, Chunk, ChunkCoord, ChunkStore, ChunkTexture, GpuChunkCache, ResourceError,
    WgpuTextureBackend,
};

use super::assets::TileAssets;
use super::bind_groups::{SelectPassResources, TileBindGroupLayouts, WorldPassResources};
use super::geometry::QuadGeometry;
use super::pipelines::TilePipelines;
use super::projection::{
    chunk_center, chunk_matrix, select_line_width, tex_morph, texture_offset, world_line_width,
    WorldToView,
};
use super::uniforms::{ChunkUniform, GridUniform, SelectUniform};

pub struct TileRenderer {
    queue: Arc<wgpu::Queue>,
    config: TileRendererConfig,
    pipelines: TilePipelines,
    world_quad: QuadGeometry,
    select_quad: QuadGeometry,
    world_pass: WorldPassResources,
    select_pass: SelectPassResources,
    world: GpuChunkCache<WgpuTextureBackend>,
    selection: GpuChunkCache<WgpuTextureBackend>,
}

impl TileRenderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        assets: &dyn TileAssets,
        config: TileRendererConfig,
    ) -> Result<Self, ResourceError> {
        let layouts = TileBindGroupLayouts::new(&device);
        let pipelines = TilePipelines::new(&device, config.color_format, &layouts);

        let world_quad = QuadGeometry::new(&device, 1.0, "Tile World Quad");
        let select_quad = QuadGeometry::new(&device, SELECT_OVERESTIMATE, "Tile Select Quad");

        let world_pass = WorldPassResources::new(&device, &queue, &layouts.world, assets, &config)?;
        let select_pass = SelectPassResources::new(&device, &layouts.select, &config);

        let sampler = Arc::new(create_chunk_sampler(&device));
        let world = GpuChunkCache::new(
            WgpuTextureBackend::new(
                device.clone(),
                queue.clone(),
                layouts.chunk.clone(),
                sampler.clone(),
                "World",
            ),
            CachePolicy::Accumulate,
            "World",
        );
        let selection = GpuChunkCache::new(
            WgpuTextureBackend::new(device, queue.clone(), layouts.chunk, sampler, "Select"),
            CachePolicy::Rebuild,
            "Select",
        );

        log::info!("Tile renderer ready (target {:?})", config.color_format);

        Ok(Self {
            queue,
            config,
            pipelines,
            world_quad,
            select_quad,
            world_pass,
            select_pass,
            world,
            selection,
        })
    }

    pub fn config(&self) -> &TileRendererConfig {
        &self.config
    }

    // ---------- Мир ----------

    /// Залить (или перезалить) один чанк мира
    pub fn build(&mut self, chunk: &Chunk) -> Result<(), ResourceError> {
        self.world.build(chunk)
    }

    /// Заменить весь кэш мира набором чанков
    pub fn build_many<'a>(&mut self, chunks: impl IntoIterator<Item = &'a Chunk>) -> Result<(), ResourceError> {
        self.world.build_many(chunks)
    }

    /// Залить изменённые с прошлого sync чанки. Возвращает их количество.
    pub fn sync(&mut self, store: &mut ChunkStore) -> Result<usize, ResourceError> {
        let dirty = store.take_dirty();
        let count = dirty.len();
        for coord in dirty {
            if let Some(chunk) = store.chunk(coord) {
                self.world.build(chunk)?;
            }
        }
        if count > 0 {
            log::debug!("Synced {} world chunks ({} resident)", count, self.world.len());
        }
        Ok(count)
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    pub fn resident_chunks(&self) -> usize {
        self.world.len()
    }

    pub fn world_cache(&self) -> &GpuChunkCache<WgpuTextureBackend> {
        &self.world
    }

    // ---------- Выделение ----------

    /// Показать новое выделение (старое освобождается)
    pub fn build_select<'a>(&mut self, chunks: impl IntoIterator<Item = &'a Chunk>) -> Result<(), ResourceError> {
        self.selection.refresh(chunks)
    }

    pub fn clear_select(&mut self) {
        self.selection.clear();
    }

    pub fn selected_chunks(&self) -> usize {
        self.selection.len()
    }

    pub fn selection_cache(&self) -> &GpuChunkCache<WgpuTextureBackend> {
        &self.selection
    }

    // ---------- Отрисовка ----------

    /// Проход мира. Вызывать не больше одного раза на submit:
    /// per-chunk uniform-ы пишутся через queue.
    pub fn draw_world(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &dyn WorldToView,
        view_projection: Mat4,
        tint: [f32; 4],
        view_scale: f32,
    ) {
        if self.world.is_empty() {
            return;
        }

        let grid = GridUniform::new(tex_morph(), tint, world_line_width(view_scale), self.config.texture_scale);
        self.queue
            .write_buffer(&self.world_pass.uniform_buffer, 0, bytemuck::cast_slice(&[grid]));

        pass.set_pipeline(&self.pipelines.world);
        pass.set_bind_group(1, &self.world_pass.bind_group, &[]);
        pass.set_vertex_buffer(0, self.world_quad.vertex_buffer.slice(..));

        for (coord, texture) in self.world.iter() {
            self.draw_chunk(pass, camera, view_projection, coord, texture, texture_offset(coord));
            pass.draw(0..self.world_quad.vertex_count, 0..1);
        }
    }

    /// Проход выделения поверх мира
    pub fn draw_selection(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &dyn WorldToView,
        view_projection: Mat4,
        view_scale: f32,
    ) {
        if self.selection.is_empty() {
            return;
        }

        let select = SelectUniform::new(
            tex_morph(),
            self.config.select_empty_color,
            self.config.select_fill_color,
            select_line_width(view_scale),
        );
        self.queue
            .write_buffer(&self.select_pass.uniform_buffer, 0, bytemuck::cast_slice(&[select]));

        pass.set_pipeline(&self.pipelines.select);
        pass.set_bind_group(1, &self.select_pass.bind_group, &[]);
        pass.set_vertex_buffer(0, self.select_quad.vertex_buffer.slice(..));

        for (coord, texture) in self.selection.iter() {
            self.draw_chunk(pass, camera, view_projection, coord, texture, Vec2::zero());
            pass.draw(0..self.select_quad.vertex_count, 0..1);
        }
    }

    fn draw_chunk(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &dyn WorldToView,
        view_projection: Mat4,
        coord: ChunkCoord,
        texture: &ChunkTexture,
        texture_offset: Vec2,
    ) {
        let view_offset = camera.world_to_view(chunk_center(coord));
        let uniform = ChunkUniform::new(chunk_matrix(view_projection, view_offset), texture_offset);
        self.queue
            .write_buffer(&texture.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
        pass.set_bind_group(0, &texture.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::render::{init_headless, IsometricView, ProceduralAssets};

    /// Рендерер на headless устройстве; None, если GPU нет
    fn headless_renderer() -> Option<(Arc<wgpu::Device>, Arc<wgpu::Queue>, TileRenderer)> {
        let (device, queue) = match pollster::block_on(init_headless()) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("skipping GPU test: {}", e);
                return None;
            }
        };
        let renderer = TileRenderer::new(
            device.clone(),
            queue.clone(),
            &ProceduralAssets { size: 8 },
            TileRendererConfig::default(),
        )
        .unwrap();
        Some((device, queue, renderer))
    }

    #[test]
    fn test_sync_uploads_only_dirty_chunks() {
        let Some((_device, _queue, mut renderer)) = headless_renderer() else {
            return;
        };

        let mut store = ChunkStore::new();
        store.set_tile(1, 0, 0);
        store.set_tile(2, 20, 3);
        store.set_tile(1, 1, 1);

        assert_eq!(renderer.sync(&mut store).unwrap(), 2);
        assert_eq!(renderer.resident_chunks(), 2);
        assert_eq!(renderer.sync(&mut store).unwrap(), 0);

        // Перезапись существующего чанка не добавляет текстур
        store.set_tile(5, 2, 2);
        store.set_tile(1, -1, -1);
        assert_eq!(renderer.sync(&mut store).unwrap(), 2);
        assert_eq!(renderer.resident_chunks(), 3);
        assert!(renderer.world_cache().contains(ChunkCoord::new(-1, -1)));

        renderer.clear();
        assert_eq!(renderer.resident_chunks(), 0);
    }

    #[test]
    fn test_build_select_replaces_previous_selection() {
        let Some((_device, _queue, mut renderer)) = headless_renderer() else {
            return;
        };

        let first = ChunkStore::from_tiles(1, [(0, 0), (16, 0)]);
        renderer.build_select(first.chunks()).unwrap();
        assert_eq!(renderer.selected_chunks(), 2);

        let second = ChunkStore::from_tiles(1, [(-1, -1)]);
        renderer.build_select(second.chunks()).unwrap();
        assert_eq!(renderer.selected_chunks(), 1);
        assert!(renderer.selection_cache().contains(ChunkCoord::new(-1, -1)));
        assert!(!renderer.selection_cache().contains(ChunkCoord::new(0, 0)));

        renderer.clear_select();
        assert_eq!(renderer.selected_chunks(), 0);
    }

    #[test]
    fn test_draw_both_passes_offscreen() {
        let Some((device, queue, mut renderer)) = headless_renderer() else {
            return;
        };

        let mut store = ChunkStore::new();
        store.set_tile(1, 3, 3);
        store.set_tile(2, -4, 9);
        renderer.sync(&mut store).unwrap();
        let mask = ChunkStore::from_tiles(1, [(3, 3)]);
        renderer.build_select(mask.chunks()).unwrap();

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Test Target"),
            size: wgpu::Extent3d {
                width: 64,
                height: 64,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: renderer.config().color_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let view_projection = ultraviolet::projection::orthographic_wgpu_dx(-32.0, 32.0, -32.0, 32.0, -1.0, 1.0);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Test Encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Test Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            renderer.draw_world(&mut pass, &IsometricView, view_projection, [1.0; 4], 1.0);
            renderer.draw_selection(&mut pass, &IsometricView, view_projection, 1.0);
        }
        queue.submit(std::iter::once(encoder.finish()));
        device.poll(wgpu::PollType::Wait).unwrap();

        let error = pollster::block_on(device.pop_error_scope());
        assert!(error.is_none(), "validation error: {:?}", error);
    }
}
