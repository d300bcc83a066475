// ============================================
// App - Headless демо: документ -> GPU -> один кадр
// ============================================

use std::path::PathBuf;
use std::time::Instant;

use ultraviolet::Vec2;

use crate::gpu::core::config::{TileRendererConfig, CHUNK_SIZE};
use crate::gpu::render::{init_headless, IsometricView, ProceduralAssets, TileRenderer, WorldToView};
use crate::gpu::save::{ChunkDocument, ChunkDocumentError};
use crate::gpu::terrain::{ChunkCoord, ChunkStore, ResourceError};

const FRAME_SIZE: u32 = 512;
/// Радиус демо-узора в тайлах
const DEMO_RADIUS: i32 = 24;
/// Радиус выделения вокруг курсора
const SELECT_RADIUS: i32 = 2;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Document(#[from] ChunkDocumentError),

    #[error("GPU poll failed: {0}")]
    Poll(#[from] wgpu::PollError),
}

/// Запуск демо: `tilegrid [document.json] [out.json]`
pub fn run() {
    env_logger::init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let input = args.next();
    let output = args.next();

    if let Err(e) = pollster::block_on(render_once(input, output)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn render_once(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), AppError> {
    let mut store = match &input {
        Some(path) => ChunkDocument::load(path)?,
        None => demo_store(),
    };
    log::info!("Store has {} chunks", store.len());

    let (device, queue) = init_headless().await?;
    let config = TileRendererConfig::default();
    let mut renderer = TileRenderer::new(device.clone(), queue.clone(), &ProceduralAssets::default(), config)?;

    let start = Instant::now();
    let uploaded = renderer.sync(&mut store)?;
    log::info!("Uploaded {} chunks in {:.2?}", uploaded, start.elapsed());

    // Курсор в центре кадра
    let camera = IsometricView;
    let bounds = view_bounds(&store, &camera);
    let (px, py) = camera.pick_tile((bounds.0 + bounds.1) * 0.5);
    let selection = ChunkStore::from_tiles(
        1,
        (-SELECT_RADIUS..=SELECT_RADIUS)
            .flat_map(|dx| (-SELECT_RADIUS..=SELECT_RADIUS).map(move |dy| (px + dx, py + dy))),
    );
    renderer.build_select(selection.chunks())?;
    log::info!("Pointer at tile ({}, {}), {} selection chunks", px, py, renderer.selected_chunks());

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: wgpu::Extent3d {
            width: FRAME_SIZE,
            height: FRAME_SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.color_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let (min, max) = bounds;
    let view_projection = ultraviolet::projection::orthographic_wgpu_dx(min.x, max.x, min.y, max.y, -1.0, 1.0);

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Tile Frame Encoder"),
    });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Tile Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.08,
                        g: 0.09,
                        b: 0.12,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        renderer.draw_world(&mut pass, &camera, view_projection, [1.0; 4], 1.0);
        renderer.draw_selection(&mut pass, &camera, view_projection, 1.0);
    }
    queue.submit(std::iter::once(encoder.finish()));
    device.poll(wgpu::PollType::Wait)?;

    log::info!(
        "Rendered {}x{} frame: {} world chunks, {} selected, {:.2?} total",
        FRAME_SIZE,
        FRAME_SIZE,
        renderer.resident_chunks(),
        renderer.selected_chunks(),
        start.elapsed()
    );

    if let Some(path) = output {
        ChunkDocument::save(&path, &store)?;
    }
    Ok(())
}

/// Ромбовидный узор из двух видов тайлов с дырами
fn demo_store() -> ChunkStore {
    let mut store = ChunkStore::new();
    for x in -DEMO_RADIUS..DEMO_RADIUS {
        for y in -DEMO_RADIUS..DEMO_RADIUS {
            if x.abs() + y.abs() >= DEMO_RADIUS {
                continue;
            }
            let value = match (x * 7 + y * 13).rem_euclid(11) {
                0 => 0,
                1..=3 => 2,
                _ => 1,
            };
            store.set_tile(value, x, y);
        }
    }
    store
}

/// Границы всех чанков в view space (с запасом в один тайл)
fn view_bounds(store: &ChunkStore, camera: &dyn WorldToView) -> (Vec2, Vec2) {
    let mut min = Vec2::broadcast(f32::MAX);
    let mut max = Vec2::broadcast(f32::MIN);
    let size = CHUNK_SIZE as f32;

    for coord in store.coords() {
        let (ox, oy) = coord.origin_tile();
        for (cx, cy) in [(0.0, 0.0), (size, 0.0), (0.0, size), (size, size)] {
            let corner = camera.world_to_view(Vec2::new(ox as f32 + cx, oy as f32 + cy));
            min = min.min_by_component(corner);
            max = max.max_by_component(corner);
        }
    }

    if store.is_empty() {
        let origin = ChunkCoord::new(0, 0).origin_tile();
        let center = camera.world_to_view(Vec2::new(origin.0 as f32, origin.1 as f32));
        return (center - Vec2::broadcast(size), center + Vec2::broadcast(size));
    }
    (min - Vec2::one(), max + Vec2::one())
}
