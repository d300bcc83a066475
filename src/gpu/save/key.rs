// ============================================
// Chunk Key - Ключи документа "(cx, cy)"
// ============================================

use crate::gpu::terrain::ChunkCoord;
use super::error::ChunkDocumentError;

pub fn format_chunk_key(coord: ChunkCoord) -> String {
    coord.to_string()
}

/// Разобрать ключ "(cx, cy)". Пробелы вокруг компонент допускаются.
pub fn parse_chunk_key(key: &str) -> Result<ChunkCoord, ChunkDocumentError> {
    let malformed = || ChunkDocumentError::MalformedKey { key: key.to_string() };

    let mut parts = key.split(',');
    let (first, second) = match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => (first.trim(), second.trim()),
        _ => return Err(malformed()),
    };

    let x_text = first.strip_prefix('(').filter(|s| !s.is_empty()).ok_or_else(malformed)?;
    let y_text = second.strip_suffix(')').filter(|s| !s.is_empty()).ok_or_else(malformed)?;

    let x = parse_component(key, x_text)?;
    let y = parse_component(key, y_text)?;

    Ok(ChunkCoord::new(x, y))
}

/// Целое со знаком минус; `+` не допускается
fn parse_component(key: &str, text: &str) -> Result<i32, ChunkDocumentError> {
    let text = text.trim();
    if text.starts_with('+') {
        return Err(ChunkDocumentError::KeyNotInteger { key: key.to_string() });
    }
    text.parse::<i32>()
        .map_err(|_| ChunkDocumentError::KeyNotInteger { key: key.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys() {
        assert_eq!(parse_chunk_key("(1, 0)").unwrap(), ChunkCoord::new(1, 0));
        assert_eq!(parse_chunk_key("(-3,12)").unwrap(), ChunkCoord::new(-3, 12));
        assert_eq!(parse_chunk_key("  ( 7 ,  -8 )  ").unwrap(), ChunkCoord::new(7, -8));
    }

    #[test]
    fn test_missing_paren_is_format_error() {
        let err = parse_chunk_key("1, 2)").unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, ChunkDocumentError::MalformedKey { .. }));

        assert!(parse_chunk_key("(1, 2").unwrap_err().is_format());
        assert!(parse_chunk_key("(, 2)").unwrap_err().is_format());
        assert!(parse_chunk_key("(1, )").unwrap_err().is_format());
        assert!(parse_chunk_key("(1 2)").unwrap_err().is_format());
        assert!(parse_chunk_key("(1, 2, 3)").unwrap_err().is_format());
    }

    #[test]
    fn test_non_integer_components() {
        let err = parse_chunk_key("(a, 2)").unwrap_err();
        assert!(matches!(err, ChunkDocumentError::KeyNotInteger { .. }));
        assert!(matches!(
            parse_chunk_key("(1, 99999999999)").unwrap_err(),
            ChunkDocumentError::KeyNotInteger { .. }
        ));
    }

    #[test]
    fn test_plus_sign_rejected() {
        for key in ["(+1, 2)", "(1, +2)", "( +1 , +2 )"] {
            assert!(matches!(
                parse_chunk_key(key).unwrap_err(),
                ChunkDocumentError::KeyNotInteger { .. }
            ), "{}", key);
        }
        assert_eq!(parse_chunk_key("(-1, -2)").unwrap(), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn test_error_names_the_key() {
        let err = parse_chunk_key("oops").unwrap_err();
        assert!(err.to_string().contains("oops"));
    }
}
