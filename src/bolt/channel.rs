//! Byte-channel contract between the codec and the chunked transport.
//!
//! The transport owns framing: it splits outgoing messages into chunks and
//! reassembles incoming ones, so the codec sees a contiguous stream of
//! typed big-endian primitives. The codec consumes these traits and never
//! schedules or owns the underlying connection.

use bytes::{Buf, BufMut, BytesMut};

use super::packstream::PackStreamError;

/// Write side of the channel. All multi-byte values are big-endian.
///
/// Writes are buffered by the transport and cannot fail; errors surface
/// when the transport flushes.
pub trait WriteChannel {
    /// Write one unsigned byte.
    fn write_u8(&mut self, value: u8);
    /// Write an unsigned 16-bit value.
    fn write_u16(&mut self, value: u16);
    /// Write an unsigned 32-bit value.
    fn write_u32(&mut self, value: u32);
    /// Write a signed byte.
    fn write_i8(&mut self, value: i8);
    /// Write a signed 16-bit value.
    fn write_i16(&mut self, value: i16);
    /// Write a signed 32-bit value.
    fn write_i32(&mut self, value: i32);
    /// Write a 64-bit IEEE-754 float.
    fn write_f64(&mut self, value: f64);
    /// Write raw bytes.
    fn write_bytes(&mut self, bytes: &[u8]);
}

/// Read side of the channel. All multi-byte values are big-endian.
///
/// Reads fail with [`PackStreamError::UnexpectedEof`] when the current
/// message is exhausted.
pub trait ReadChannel {
    /// Read one unsigned byte.
    fn read_u8(&mut self) -> Result<u8, PackStreamError>;
    /// Read an unsigned 16-bit value.
    fn read_u16(&mut self) -> Result<u16, PackStreamError>;
    /// Read an unsigned 32-bit value.
    fn read_u32(&mut self) -> Result<u32, PackStreamError>;
    /// Read a signed byte.
    fn read_i8(&mut self) -> Result<i8, PackStreamError>;
    /// Read a signed 16-bit value.
    fn read_i16(&mut self) -> Result<i16, PackStreamError>;
    /// Read a signed 32-bit value.
    fn read_i32(&mut self) -> Result<i32, PackStreamError>;
    /// Read a signed 64-bit value.
    fn read_i64(&mut self) -> Result<i64, PackStreamError>;
    /// Read a 64-bit IEEE-754 float.
    fn read_f64(&mut self) -> Result<f64, PackStreamError>;
    /// Read `len` raw bytes.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, PackStreamError>;
}

/// In-memory channel over a [`BytesMut`] buffer.
///
/// Writes append to the back, reads consume from the front. Used by tests
/// and by the one-shot pack/unpack conveniences; production connections
/// provide their own framed implementation.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    buffer: BytesMut,
}

impl MemoryChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(256),
        }
    }

    /// Create a channel pre-filled with bytes to read.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            buffer: BytesMut::from(data),
        }
    }

    /// Bytes currently buffered.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Consume the channel and return the buffered bytes.
    pub fn into_bytes(self) -> BytesMut {
        self.buffer
    }

    fn ensure(&self, len: usize) -> Result<(), PackStreamError> {
        if self.buffer.len() < len {
            Err(PackStreamError::UnexpectedEof)
        } else {
            Ok(())
        }
    }
}

impl WriteChannel for MemoryChannel {
    fn write_u8(&mut self, value: u8) {
        self.buffer.put_u8(value);
    }

    fn write_u16(&mut self, value: u16) {
        self.buffer.put_u16(value);
    }

    fn write_u32(&mut self, value: u32) {
        self.buffer.put_u32(value);
    }

    fn write_i8(&mut self, value: i8) {
        self.buffer.put_i8(value);
    }

    fn write_i16(&mut self, value: i16) {
        self.buffer.put_i16(value);
    }

    fn write_i32(&mut self, value: i32) {
        self.buffer.put_i32(value);
    }

    fn write_f64(&mut self, value: f64) {
        self.buffer.put_f64(value);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.put_slice(bytes);
    }
}

impl ReadChannel for MemoryChannel {
    fn read_u8(&mut self) -> Result<u8, PackStreamError> {
        self.ensure(1)?;
        Ok(self.buffer.get_u8())
    }

    fn read_u16(&mut self) -> Result<u16, PackStreamError> {
        self.ensure(2)?;
        Ok(self.buffer.get_u16())
    }

    fn read_u32(&mut self) -> Result<u32, PackStreamError> {
        self.ensure(4)?;
        Ok(self.buffer.get_u32())
    }

    fn read_i8(&mut self) -> Result<i8, PackStreamError> {
        self.ensure(1)?;
        Ok(self.buffer.get_i8())
    }

    fn read_i16(&mut self) -> Result<i16, PackStreamError> {
        self.ensure(2)?;
        Ok(self.buffer.get_i16())
    }

    fn read_i32(&mut self) -> Result<i32, PackStreamError> {
        self.ensure(4)?;
        Ok(self.buffer.get_i32())
    }

    fn read_i64(&mut self) -> Result<i64, PackStreamError> {
        self.ensure(8)?;
        Ok(self.buffer.get_i64())
    }

    fn read_f64(&mut self) -> Result<f64, PackStreamError> {
        self.ensure(8)?;
        Ok(self.buffer.get_f64())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, PackStreamError> {
        self.ensure(len)?;
        let mut out = vec![0u8; len];
        self.buffer.copy_to_slice(&mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let mut channel = MemoryChannel::new();
        channel.write_u8(0xAB);
        channel.write_u16(0x0102);
        channel.write_u32(0x0304_0506);
        channel.write_i8(-1);
        channel.write_i16(-2);
        channel.write_i32(-3);
        channel.write_f64(1.5);
        channel.write_bytes(&[9, 8, 7]);

        assert_eq!(channel.read_u8().unwrap(), 0xAB);
        assert_eq!(channel.read_u16().unwrap(), 0x0102);
        assert_eq!(channel.read_u32().unwrap(), 0x0304_0506);
        assert_eq!(channel.read_i8().unwrap(), -1);
        assert_eq!(channel.read_i16().unwrap(), -2);
        assert_eq!(channel.read_i32().unwrap(), -3);
        assert_eq!(channel.read_f64().unwrap(), 1.5);
        assert_eq!(channel.read_bytes(3).unwrap(), vec![9, 8, 7]);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_big_endian_layout() {
        let mut channel = MemoryChannel::new();
        channel.write_u16(0x0102);
        channel.write_i32(1000);
        assert_eq!(channel.as_bytes(), &[0x01, 0x02, 0x00, 0x00, 0x03, 0xE8]);
    }

    #[test]
    fn test_read_past_end() {
        let mut channel = MemoryChannel::from_bytes(&[0x01]);
        assert_eq!(channel.read_u8().unwrap(), 1);
        assert!(matches!(
            channel.read_u8(),
            Err(PackStreamError::UnexpectedEof)
        ));
        assert!(matches!(
            channel.read_i64(),
            Err(PackStreamError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_i64_roundtrip() {
        let mut channel = MemoryChannel::new();
        channel.write_i32((i64::MIN >> 32) as i32);
        channel.write_u32(i64::MIN as u32);
        assert_eq!(channel.read_i64().unwrap(), i64::MIN);
    }
}
