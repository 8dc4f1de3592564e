//! Incremental UTF-8 decoding for unframed byte streams.
//!
//! The completion endpoint streams raw bytes with no chunk framing, so a
//! multi-byte codepoint can arrive split across two reads. The decoder
//! buffers an undecodable trailing sequence between calls instead of
//! assuming chunk-aligned text boundaries.

use crate::error::CompletionError;

/// Stateful chunk-by-chunk UTF-8 decoder.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
    consumed: usize,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    ///
    /// An incomplete trailing sequence is held back for the next call; an
    /// invalid sequence is an error carrying its absolute byte offset in
    /// the stream.
    pub fn decode(&mut self, chunk: &[u8]) -> Result<String, CompletionError> {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        match std::str::from_utf8(&bytes) {
            Ok(text) => {
                self.consumed += bytes.len();
                Ok(text.to_string())
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                if err.error_len().is_some() {
                    // A real invalid sequence, not a split codepoint.
                    return Err(CompletionError::InvalidUtf8 {
                        offset: self.consumed + valid_up_to,
                    });
                }
                let text = String::from_utf8_lossy(&bytes[..valid_up_to]).into_owned();
                self.pending = bytes[valid_up_to..].to_vec();
                self.consumed += valid_up_to;
                Ok(text)
            }
        }
    }

    /// Signal end of stream. Errors if a codepoint was left incomplete.
    pub fn finish(self) -> Result<(), CompletionError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(CompletionError::InvalidUtf8 {
                offset: self.consumed,
            })
        }
    }
}
