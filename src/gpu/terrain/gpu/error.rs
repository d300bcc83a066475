// ============================================
// Resource Error - Ошибки GPU ресурсов
// ============================================
// Фатальные: не ретраятся, решение принимает приложение.

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("GPU out of memory while {context}")]
    OutOfMemory { context: String },

    #[error("GPU validation failed while {context}: {message}")]
    Validation { context: String, message: String },

    #[error("asset '{name}' is not available")]
    MissingAsset { name: String },

    #[error("asset '{name}' is invalid: {reason}")]
    InvalidAsset { name: String, reason: String },

    #[error("no compatible GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

impl ResourceError {
    pub fn from_wgpu(context: String, error: wgpu::Error) -> Self {
        match error {
            wgpu::Error::OutOfMemory { .. } => Self::OutOfMemory { context },
            other => Self::Validation {
                context,
                message: other.to_string(),
            },
        }
    }
}

/// Выполнить GPU операцию внутри error scope и превратить ошибку драйвера в `ResourceError`
pub fn with_error_scope<T>(
    device: &wgpu::Device,
    context: impl FnOnce() -> String,
    op: impl FnOnce() -> T,
) -> Result<T, ResourceError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let value = op();

    // Scope-ы снимаются в обратном порядке
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    match out_of_memory.or(validation) {
        Some(error) => Err(ResourceError::from_wgpu(context(), error)),
        None => Ok(value),
    }
}
