// ============================================
// GPU Context - Инициализация устройства без окна
// ============================================

use std::sync::Arc;

use crate::gpu::terrain::ResourceError;

/// Headless device + queue. Border clamp запрашивается, если адаптер его умеет.
pub async fn init_headless() -> Result<(Arc<wgpu::Device>, Arc<wgpu::Queue>), ResourceError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await?;

    let info = adapter.get_info();
    log::info!("Using adapter {} ({:?})", info.name, info.backend);

    let required_features = adapter.features() & wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("Tile GPU Device"),
            required_features,
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await?;

    Ok((Arc::new(device), Arc::new(queue)))
}
