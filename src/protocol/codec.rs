//! Newline-delimited JSON framing for the stdio transport.
//!
//! Each frame is one compact JSON document followed by `\n`. Lines that are not
//! valid JSON (or not the expected shape) are surfaced as `Decoded::Malformed`
//! so the server can answer them without tearing down the stream.

use bytes::{Buf, BufMut, BytesMut};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use tokio_util::codec::{Decoder, Encoder};

/// Default max frame length (16 MB)
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// One decoded line
#[derive(Debug)]
pub enum Decoded<T> {
    /// Line parsed into the expected type
    Message(T),
    /// Line was not valid for the expected type
    Malformed(serde_json::Error),
}

/// Newline-delimited JSON codec.
#[derive(Debug)]
pub struct NdJsonCodec<T> {
    _phantom: PhantomData<T>,
    max_length: usize,
    /// Bytes of the buffer already searched for a newline
    next_index: usize,
}

impl<T> NdJsonCodec<T> {
    /// Create a new codec with default max length (16 MB).
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_FRAME_BYTES)
    }

    /// Create a new codec with custom max length.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            _phantom: PhantomData,
            max_length,
            next_index: 0,
        }
    }

    /// Get the max frame length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn too_large(&self, length: usize) -> std::io::Error {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Message too large: {} > {}", length, self.max_length),
        )
    }
}

impl<T> Default for NdJsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NdJsonCodec<T> {
    fn clone(&self) -> Self {
        Self::with_max_length(self.max_length)
    }
}

fn parse_line<T: DeserializeOwned>(line: &[u8]) -> Decoded<T> {
    match serde_json::from_slice(line) {
        Ok(msg) => Decoded::Message(msg),
        Err(e) => Decoded::Malformed(e),
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
}

impl<T: DeserializeOwned> Decoder for NdJsonCodec<T> {
    type Item = Decoded<T>;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> std::result::Result<Option<Self::Item>, Self::Error> {
        loop {
            let start = self.next_index.min(src.len());
            let Some(offset) = src[start..].iter().position(|&b| b == b'\n') else {
                // Buffer without a newline must not grow past the limit
                if src.len() > self.max_length {
                    return Err(self.too_large(src.len()));
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let pos = start + offset;
            self.next_index = 0;

            if pos > self.max_length {
                return Err(self.too_large(pos));
            }

            let line = src.split_to(pos);
            src.advance(1);

            if is_blank(&line) {
                continue;
            }

            return Ok(Some(parse_line(&line)));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> std::result::Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        // Final line without a trailing newline
        self.next_index = 0;
        if is_blank(src) {
            src.clear();
            return Ok(None);
        }
        let line = src.split_to(src.len());
        Ok(Some(parse_line(&line)))
    }
}

impl<T: Serialize> Encoder<T> for NdJsonCodec<T> {
    type Error = std::io::Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> std::result::Result<(), Self::Error> {
        // Compact serialization never contains a raw newline
        let json = serde_json::to_vec(&item)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, format!("JSON error: {}", e)))?;

        if json.len() > self.max_length {
            return Err(self.too_large(json.len()));
        }

        dst.reserve(json.len() + 1);
        dst.put_slice(&json);
        dst.put_u8(b'\n');

        Ok(())
    }
}
