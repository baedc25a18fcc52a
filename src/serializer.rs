//! Binary serializer
//!
//! `BytesList` is the append-only sink every codec writes into. It owns the
//! output buffer for one encode call; helpers cover big-endian integers and
//! variable-length-prefixed writes.

use crate::error::{CodecError, CodecResult};
use crate::parser::MAX_VL_LENGTH;

/// Append-only byte sink.
#[derive(Debug, Default)]
pub struct BytesList {
    buf: Vec<u8>,
}

impl BytesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Emit the 1/2/3-byte length prefix for `length` (dual of
    /// `BinaryParser::read_vl_length`).
    pub fn put_vl_length(&mut self, length: usize) -> CodecResult<()> {
        match length {
            0..=192 => self.put_u8(length as u8),
            193..=12_480 => {
                let rest = length - 193;
                self.put_u8(193 + (rest >> 8) as u8);
                self.put_u8((rest & 0xFF) as u8);
            }
            12_481..=MAX_VL_LENGTH => {
                let rest = length - 12_481;
                self.put_u8(241 + (rest >> 16) as u8);
                self.put_u8(((rest >> 8) & 0xFF) as u8);
                self.put_u8((rest & 0xFF) as u8);
            }
            _ => return Err(CodecError::LengthOutOfRange { length }),
        }
        Ok(())
    }

    /// Emit a length prefix followed by the bytes themselves.
    pub fn put_vl(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.put_vl_length(bytes.len())?;
        self.put_slice(bytes);
        Ok(())
    }
}
