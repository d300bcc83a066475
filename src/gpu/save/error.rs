// ============================================
// Document Error - Ошибки загрузки документа чанков
// ============================================

/// Ошибки чтения/записи документа. Любая ошибка прерывает загрузку целиком.
#[derive(Debug, thiserror::Error)]
pub enum ChunkDocumentError {
    /// Ключ не похож на "(cx, cy)"
    #[error("wrong chunk key format: {key:?}")]
    MalformedKey { key: String },

    #[error("could not parse chunk key as ints: {key:?}")]
    KeyNotInteger { key: String },

    /// Длина `data` не равна SIZE * SIZE
    #[error("chunk {key} has block data of wrong size {len}")]
    Size { key: String, len: usize },

    #[error("chunk {key} declares origin ({x}, {y})")]
    OriginMismatch { key: String, x: i32, y: i32 },

    #[error("chunk {key} cell {index} = {value} is outside the byte range")]
    CellRange { key: String, index: usize, value: i64 },

    #[error("chunk {key} record is malformed: {source}")]
    Record {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chunk document must be a JSON object")]
    NotAnObject,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChunkDocumentError {
    /// Ошибка формата ключа
    pub fn is_format(&self) -> bool {
        matches!(self, Self::MalformedKey { .. } | Self::KeyNotInteger { .. })
    }

    /// Ошибка размера данных чанка
    pub fn is_size(&self) -> bool {
        matches!(self, Self::Size { .. })
    }
}
