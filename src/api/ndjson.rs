//! Newline-delimited JSON framing for streamed `/api/chat` bodies.

use crate::error::ApiError;
use crate::types::ChatChunk;

/// Reassembles complete lines from arbitrarily split network chunks.
///
/// Bytes are buffered until a newline arrives so multi-byte UTF-8 sequences
/// split across chunks decode correctly.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and return every complete, non-blank line.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&raw);
        let trimmed = line.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Decode one stream line, surfacing in-band `{"error": ...}` objects.
pub fn parse_chunk_line(line: &str) -> Result<ChatChunk, ApiError> {
    let chunk: ChatChunk = serde_json::from_str(line)
        .map_err(|err| ApiError::InvalidResponse(format!("invalid stream line: {err}")))?;
    if let Some(message) = chunk.error.as_deref() {
        return Err(ApiError::Model(message.to_string()));
    }
    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_lines_split_across_chunks() {
        let mut decoder = NdjsonDecoder::new();
        assert!(decoder.push(br#"{"message":{"content":"He"#).is_empty());
        let lines = decoder.push(b"llo\"},\"done\":false}\n{\"done\":true}\n");
        assert_eq!(
            lines,
            vec![
                r#"{"message":{"content":"Hello"},"done":false}"#.to_string(),
                r#"{"done":true}"#.to_string(),
            ]
        );
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn keeps_multibyte_characters_split_mid_sequence() {
        let text = "{\"message\":{\"content\":\"🔍\"}}\n";
        let bytes = text.as_bytes();
        // The emoji starts at byte 23; split inside its 4-byte encoding.
        let (head, tail) = bytes.split_at(25);
        let mut decoder = NdjsonDecoder::new();
        assert!(decoder.push(head).is_empty());
        let lines = decoder.push(tail);
        let chunk = parse_chunk_line(&lines[0]).unwrap();
        assert_eq!(chunk.token(), Some("🔍"));
    }

    #[test]
    fn skips_blank_lines_and_flushes_unterminated_tail() {
        let mut decoder = NdjsonDecoder::new();
        assert!(decoder.push(b"\n\r\n  \n").is_empty());
        assert!(decoder.push(br#"{"done":true}"#).is_empty());
        assert_eq!(decoder.finish().as_deref(), Some(r#"{"done":true}"#));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn in_band_error_becomes_model_error() {
        let err = parse_chunk_line(r#"{"error":"model 'x' not found"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Model(ref m) if m == "model 'x' not found"));
    }

    #[test]
    fn garbage_line_is_invalid_response() {
        let err = parse_chunk_line("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
