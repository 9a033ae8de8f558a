//! PackStream packer.

use std::collections::HashMap;

use bytes::BytesMut;

use super::marker::*;
use super::types::{Structure, Value};
use super::PackStreamError;
use crate::bolt::channel::{MemoryChannel, WriteChannel};
use crate::temporal::BigInt;

/// PackStream encoder writing values through a [`WriteChannel`].
///
/// A packer is reusable across messages; its only state is the byte-array
/// capability flag, negotiated once after the handshake. On error nothing
/// more is written, so a caller that does not flush leaves no partial
/// message on the wire.
#[derive(Debug, Clone, Default)]
pub struct Packer {
    supports_byte_arrays: bool,
}

impl Packer {
    /// Create a packer without byte-array support.
    pub fn new() -> Self {
        Self {
            supports_byte_arrays: false,
        }
    }

    /// Create a packer with byte-array support enabled.
    pub fn with_byte_array_support() -> Self {
        Self {
            supports_byte_arrays: true,
        }
    }

    /// Enable or disable byte-array support. Set once after the handshake,
    /// before the first message.
    pub fn set_byte_array_support(&mut self, supported: bool) {
        self.supports_byte_arrays = supported;
    }

    /// Whether byte arrays can be sent to the peer.
    pub fn supports_byte_arrays(&self) -> bool {
        self.supports_byte_arrays
    }

    /// Encode one value.
    ///
    /// Graph entities are refused: they are server-produced and have no
    /// meaning in query parameters. Generic [`Structure`] values pass
    /// through verbatim.
    pub fn pack<C: WriteChannel>(
        &self,
        value: &Value,
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        match value {
            Value::Null => {
                channel.write_u8(NULL);
                Ok(())
            }
            Value::Boolean(b) => {
                channel.write_u8(if *b { TRUE } else { FALSE });
                Ok(())
            }
            Value::Integer(i) => {
                self.pack_integer(*i, channel);
                Ok(())
            }
            Value::Float(f) => {
                self.pack_float(*f, channel);
                Ok(())
            }
            Value::String(s) => self.pack_string(s, channel),
            Value::Bytes(b) => self.pack_bytes(b, channel),
            Value::List(l) => self.pack_list(l, channel),
            Value::Map(m) => self.pack_map(m, channel),
            Value::Structure(s) => self.pack_structure(s, channel),
            Value::Node(_)
            | Value::Relationship(_)
            | Value::UnboundRelationship(_)
            | Value::Path(_) => Err(PackStreamError::Unpackable(format!(
                "it is not allowed to pass {} values in query parameters",
                value.type_name()
            ))),
        }
    }

    /// Encode an integer using the narrowest marker class that fits.
    pub fn pack_integer<C: WriteChannel>(&self, value: i64, channel: &mut C) {
        if fits_tiny_int(value) {
            channel.write_u8(value as u8);
        } else if value >= i8::MIN as i64 && value <= i8::MAX as i64 {
            channel.write_u8(INT_8);
            channel.write_i8(value as i8);
        } else if value >= i16::MIN as i64 && value <= i16::MAX as i64 {
            channel.write_u8(INT_16);
            channel.write_i16(value as i16);
        } else if value >= i32::MIN as i64 && value <= i32::MAX as i64 {
            channel.write_u8(INT_32);
            channel.write_i32(value as i32);
        } else {
            let big = BigInt::new(value);
            channel.write_u8(INT_64);
            channel.write_i32(big.high_bits());
            channel.write_u32(big.low_bits());
        }
    }

    /// Encode a float (always 64-bit).
    pub fn pack_float<C: WriteChannel>(&self, value: f64, channel: &mut C) {
        channel.write_u8(FLOAT_64);
        channel.write_f64(value);
    }

    /// Encode a string as UTF-8 with a size-class header.
    pub fn pack_string<C: WriteChannel>(
        &self,
        value: &str,
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        let bytes = value.as_bytes();
        let len = bytes.len();

        if len <= TINY_SIZE_MAX {
            channel.write_u8(TINY_STRING_BASE + len as u8);
        } else if len <= u8::MAX as usize {
            channel.write_u8(STRING_8);
            channel.write_u8(len as u8);
        } else if len <= u16::MAX as usize {
            channel.write_u8(STRING_16);
            channel.write_u16(len as u16);
        } else if len <= u32::MAX as usize {
            channel.write_u8(STRING_32);
            channel.write_u32(len as u32);
        } else {
            return Err(PackStreamError::ValueTooLarge("string", len));
        }

        channel.write_bytes(bytes);
        Ok(())
    }

    /// Encode a byte array. Requires byte-array support on the peer.
    pub fn pack_bytes<C: WriteChannel>(
        &self,
        value: &[u8],
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        if !self.supports_byte_arrays {
            return Err(PackStreamError::ByteArraysNotSupported);
        }

        let len = value.len();
        if len <= u8::MAX as usize {
            channel.write_u8(BYTES_8);
            channel.write_u8(len as u8);
        } else if len <= u16::MAX as usize {
            channel.write_u8(BYTES_16);
            channel.write_u16(len as u16);
        } else if len <= u32::MAX as usize {
            channel.write_u8(BYTES_32);
            channel.write_u32(len as u32);
        } else {
            return Err(PackStreamError::ValueTooLarge("byte array", len));
        }

        channel.write_bytes(value);
        Ok(())
    }

    /// Encode a list. The header announces the exact element count.
    pub fn pack_list<C: WriteChannel>(
        &self,
        values: &[Value],
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        let len = values.len();

        if len <= TINY_SIZE_MAX {
            channel.write_u8(TINY_LIST_BASE + len as u8);
        } else if len <= u8::MAX as usize {
            channel.write_u8(LIST_8);
            channel.write_u8(len as u8);
        } else if len <= u16::MAX as usize {
            channel.write_u8(LIST_16);
            channel.write_u16(len as u16);
        } else if len <= u32::MAX as usize {
            channel.write_u8(LIST_32);
            channel.write_u32(len as u32);
        } else {
            return Err(PackStreamError::ValueTooLarge("list", len));
        }

        for value in values {
            self.pack(value, channel)?;
        }

        Ok(())
    }

    /// Encode a map. Keys follow the map's iteration order and no key is
    /// emitted twice.
    pub fn pack_map<C: WriteChannel>(
        &self,
        map: &HashMap<String, Value>,
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        let len = map.len();

        if len <= TINY_SIZE_MAX {
            channel.write_u8(TINY_MAP_BASE + len as u8);
        } else if len <= u8::MAX as usize {
            channel.write_u8(MAP_8);
            channel.write_u8(len as u8);
        } else if len <= u16::MAX as usize {
            channel.write_u8(MAP_16);
            channel.write_u16(len as u16);
        } else if len <= u32::MAX as usize {
            channel.write_u8(MAP_32);
            channel.write_u32(len as u32);
        } else {
            return Err(PackStreamError::ValueTooLarge("map", len));
        }

        for (key, value) in map {
            self.pack_string(key, channel)?;
            self.pack(value, channel)?;
        }

        Ok(())
    }

    /// Encode a structure header followed by its fields.
    pub fn pack_structure<C: WriteChannel>(
        &self,
        structure: &Structure,
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        self.pack_struct_header(structure.fields.len(), structure.signature, channel)?;
        for field in &structure.fields {
            self.pack(field, channel)?;
        }
        Ok(())
    }

    /// Encode a structure header: size class, field count, then the
    /// signature byte in every branch.
    pub fn pack_struct_header<C: WriteChannel>(
        &self,
        size: usize,
        signature: u8,
        channel: &mut C,
    ) -> Result<(), PackStreamError> {
        if size <= TINY_SIZE_MAX {
            channel.write_u8(TINY_STRUCT_BASE + size as u8);
        } else if size <= u8::MAX as usize {
            channel.write_u8(STRUCT_8);
            channel.write_u8(size as u8);
        } else if size <= u16::MAX as usize {
            channel.write_u8(STRUCT_16);
            channel.write_u16(size as u16);
        } else {
            return Err(PackStreamError::ValueTooLarge("structure", size));
        }
        channel.write_u8(signature);
        Ok(())
    }
}

/// Encode a single value into a fresh buffer, with byte arrays enabled.
pub fn pack_to_bytes(value: &Value) -> Result<BytesMut, PackStreamError> {
    let mut channel = MemoryChannel::new();
    Packer::with_byte_array_support().pack(value, &mut channel)?;
    Ok(channel.into_bytes())
}
