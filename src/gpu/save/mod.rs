// ============================================
// Save System - Документ чанков (JSON)
// ============================================

mod document;
mod error;
mod key;

pub use document::{
    ChunkDocument, ChunkRecord, serialize_store, deserialize_store, to_json_string, from_json_str,
};
pub use error::ChunkDocumentError;
pub use key::{format_chunk_key, parse_chunk_key};
