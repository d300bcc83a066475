// ============================================
// Chunk Document - JSON документ хранилища чанков
// ============================================
// {
//   "(cx, cy)": { "x": cx, "y": cy, "data": [SIZE*SIZE байт со знаком] },
//   ...
// }

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gpu::core::config::CHUNK_CELLS;
use crate::gpu::terrain::{Chunk, ChunkCoord, ChunkStore};
use super::error::ChunkDocumentError;
use super::key::{format_chunk_key, parse_chunk_key};

/// Запись одного чанка в документе
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub x: i32,
    pub y: i32,
    /// Ячейки в порядке `local_index`, байты со знаком
    pub data: Vec<i64>,
}

impl ChunkRecord {
    pub fn from_chunk(chunk: &Chunk) -> Self {
        let coord = chunk.coord();
        Self {
            x: coord.x,
            y: coord.y,
            data: chunk.cells().iter().map(|&c| c as i8 as i64).collect(),
        }
    }

    /// Проверить запись и превратить в чанк с координатой из ключа
    pub fn into_chunk(self, key: &str, coord: ChunkCoord) -> Result<Chunk, ChunkDocumentError> {
        if self.data.len() != CHUNK_CELLS {
            return Err(ChunkDocumentError::Size {
                key: key.to_string(),
                len: self.data.len(),
            });
        }
        if (self.x, self.y) != (coord.x, coord.y) {
            return Err(ChunkDocumentError::OriginMismatch {
                key: key.to_string(),
                x: self.x,
                y: self.y,
            });
        }

        let mut cells = [0u8; CHUNK_CELLS];
        for (index, (&value, cell)) in self.data.iter().zip(cells.iter_mut()).enumerate() {
            *cell = cell_byte(value).ok_or_else(|| ChunkDocumentError::CellRange {
                key: key.to_string(),
                index,
                value,
            })?;
        }
        Ok(Chunk::from_cells(coord, cells))
    }
}

/// Принимаем и байты со знаком (так пишем), и без знака
fn cell_byte(value: i64) -> Option<u8> {
    match value {
        -128..=-1 => Some(value as i8 as u8),
        0..=255 => Some(value as u8),
        _ => None,
    }
}

/// Сериализовать хранилище в JSON документ
pub fn serialize_store(store: &ChunkStore) -> Result<Value, ChunkDocumentError> {
    let mut doc = Map::new();
    for chunk in store.chunks() {
        let record = ChunkRecord::from_chunk(chunk);
        doc.insert(format_chunk_key(chunk.coord()), serde_json::to_value(&record)?);
    }
    Ok(Value::Object(doc))
}

/// Восстановить хранилище. Первая же ошибка прерывает загрузку целиком.
pub fn deserialize_store(doc: &Value) -> Result<ChunkStore, ChunkDocumentError> {
    let entries = doc.as_object().ok_or(ChunkDocumentError::NotAnObject)?;

    let mut store = ChunkStore::new();
    for (key, value) in entries {
        let coord = parse_chunk_key(key)?;
        let record = ChunkRecord::deserialize(value)
            .map_err(|source| ChunkDocumentError::Record { key: key.clone(), source })?;
        store.insert_chunk(record.into_chunk(key, coord)?);
    }
    Ok(store)
}

pub fn to_json_string(store: &ChunkStore) -> Result<String, ChunkDocumentError> {
    Ok(serde_json::to_string_pretty(&serialize_store(store)?)?)
}

pub fn from_json_str(json: &str) -> Result<ChunkStore, ChunkDocumentError> {
    let doc: Value = serde_json::from_str(json)?;
    deserialize_store(&doc)
}

/// Чтение/запись документа на диск
pub struct ChunkDocument;

impl ChunkDocument {
    pub fn save(path: impl AsRef<Path>, store: &ChunkStore) -> Result<(), ChunkDocumentError> {
        let path = path.as_ref();
        fs::write(path, to_json_string(store)?)?;
        log::info!("Saved {} chunks to {}", store.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<ChunkStore, ChunkDocumentError> {
        let path = path.as_ref();
        let store = from_json_str(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} chunks from {}", store.len(), path.display());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(x: i32, y: i32, len: usize) -> Value {
        serde_json::json!({ "x": x, "y": y, "data": vec![0; len] })
    }

    #[test]
    fn test_end_to_end_single_tile() {
        let mut store = ChunkStore::new();
        store.set_tile(5, 20, 3);

        let doc = serialize_store(&store).unwrap();
        let record = &doc["(1, 0)"];
        assert_eq!(record["x"], 1);
        assert_eq!(record["y"], 0);

        let data = record["data"].as_array().unwrap();
        assert_eq!(data.len(), 256);
        assert_eq!(data[4 * 16 + 3], 5);
        assert_eq!(data.iter().filter(|v| v.as_i64() != Some(0)).count(), 1);

        let loaded = deserialize_store(&doc).unwrap();
        assert_eq!(loaded.get_tile(20, 3), 5);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_roundtrip_keeps_coords_and_bytes() {
        let mut store = ChunkStore::new();
        store.set_tile(1, -1, -1);
        store.set_tile(200, 100, -50);
        store.set_tile(127, 5, 5);
        store.ensure_chunk(-300, 7);

        let loaded = from_json_str(&to_json_string(&store).unwrap()).unwrap();

        let mut expected: Vec<_> = store.coords().collect();
        let mut actual: Vec<_> = loaded.coords().collect();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);

        for chunk in store.chunks() {
            assert_eq!(loaded.chunk(chunk.coord()), Some(chunk));
        }
    }

    #[test]
    fn test_serialized_entry_reads_back_as_record() {
        let mut store = ChunkStore::new();
        store.set_tile(9, -3, 40);

        let doc = serialize_store(&store).unwrap();
        let record = ChunkRecord::deserialize(&doc["(-1, 2)"]).unwrap();
        assert_eq!((record.x, record.y), (-1, 2));
        assert_eq!(record.data.len(), CHUNK_CELLS);
        assert_eq!(record.data[13 * 16 + 8], 9);
    }

    #[test]
    fn test_high_bytes_written_signed() {
        let mut store = ChunkStore::new();
        store.set_tile(255, 0, 0);
        let doc = serialize_store(&store).unwrap();
        assert_eq!(doc["(0, 0)"]["data"][0], -1);
    }

    #[test]
    fn test_rejects_malformed_key() {
        let mut doc = Map::new();
        doc.insert("1, 2)".to_string(), record_json(1, 2, CHUNK_CELLS));
        let err = deserialize_store(&Value::Object(doc)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_rejects_short_data() {
        let mut doc = Map::new();
        doc.insert("(1, 2)".to_string(), record_json(1, 2, CHUNK_CELLS - 1));
        let err = deserialize_store(&Value::Object(doc)).unwrap_err();
        assert!(err.is_size());
        assert!(err.to_string().contains("(1, 2)"));
        assert!(err.to_string().contains("255"));
    }

    #[test]
    fn test_rejects_origin_mismatch() {
        let mut doc = Map::new();
        doc.insert("(1, 2)".to_string(), record_json(2, 1, CHUNK_CELLS));
        let err = deserialize_store(&Value::Object(doc)).unwrap_err();
        assert!(matches!(err, ChunkDocumentError::OriginMismatch { x: 2, y: 1, .. }));
    }

    #[test]
    fn test_rejects_cell_out_of_range() {
        let mut data = vec![0i64; CHUNK_CELLS];
        data[17] = 300;
        let mut doc = Map::new();
        doc.insert("(0, 0)".to_string(), serde_json::json!({ "x": 0, "y": 0, "data": data }));

        let err = deserialize_store(&Value::Object(doc)).unwrap_err();
        assert!(matches!(err, ChunkDocumentError::CellRange { index: 17, value: 300, .. }));
    }

    #[test]
    fn test_one_bad_entry_aborts_whole_load() {
        let mut doc = Map::new();
        doc.insert("(0, 0)".to_string(), record_json(0, 0, CHUNK_CELLS));
        doc.insert("(0, 1)".to_string(), serde_json::json!({ "x": 0, "y": 1 }));

        let err = deserialize_store(&Value::Object(doc)).unwrap_err();
        assert!(matches!(err, ChunkDocumentError::Record { .. }));
    }

    #[test]
    fn test_document_must_be_object() {
        let err = from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ChunkDocumentError::NotAnObject));
        assert!(matches!(from_json_str("{").unwrap_err(), ChunkDocumentError::Json(_)));
    }

    #[test]
    fn test_save_load_file() {
        let mut store = ChunkStore::new();
        store.set_tile(42, -20, 33);

        let path = std::env::temp_dir().join(format!("tilegrid_doc_{}.json", std::process::id()));
        ChunkDocument::save(&path, &store).unwrap();
        let loaded = ChunkDocument::load(&path).unwrap();
        assert_eq!(loaded.get_tile(-20, 33), 42);

        std::fs::remove_file(&path).ok();
    }
}
