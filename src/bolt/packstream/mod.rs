//! PackStream v1 serialization format.
//!
//! PackStream is the self-describing binary serialization format used by
//! the Bolt protocol. Every value starts with a marker byte naming its
//! kind; small values carry their size in the marker itself, larger ones
//! follow it with an explicit big-endian size. Multi-byte integers,
//! floats, lengths and signatures are all big-endian; strings are UTF-8.
//!
//! # Supported Types
//!
//! - **Null**: single marker byte
//! - **Boolean**: true/false markers
//! - **Integer**: smallest of tiny-int, 8, 16, 32 or 64-bit signed
//! - **Float**: 64-bit IEEE 754
//! - **String**: UTF-8, size-classed length prefix
//! - **Bytes**: raw bytes, behind a capability flag
//! - **List** / **Map**: exact element counts in the header
//! - **Structure**: one-byte signature plus a fixed field list
//!
//! # Graph Structures
//!
//! The unpacker hydrates the v1 graph signatures into value types:
//! **Node** (identity, labels, properties), **Relationship** (identity,
//! endpoints, type, properties), **UnboundRelationship** and **Path**
//! (nodes, relationships, traversal index sequence). Graph entities never
//! travel client-to-server; the packer rejects them in parameters.

pub mod marker;
pub mod packer;
pub mod structures;
pub mod types;
pub mod unpacker;

pub use marker::*;
pub use packer::{pack_to_bytes, Packer};
pub use structures::{Node, Path, PathSegment, Relationship, UnboundRelationship};
pub use types::{Structure, Value};
pub use unpacker::{build_path, unpack_from_bytes, Unpacker};

use std::fmt;

/// PackStream errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackStreamError {
    /// Unexpected end of input
    UnexpectedEof,
    /// Unknown marker byte
    UnknownMarker(u8),
    /// Invalid UTF-8 in string
    InvalidUtf8(String),
    /// Invalid map key (must be string)
    InvalidMapKey,
    /// Value too large to encode
    ValueTooLarge(&'static str, usize),
    /// Invalid structure format
    InvalidStructure(String),
    /// Value the packer cannot represent (graph entity in parameters)
    Unpackable(String),
    /// Byte array sent to a peer without byte-array support
    ByteArraysNotSupported,
}

impl PackStreamError {
    /// True for wire-level violations that are fatal to the connection,
    /// as opposed to caller mistakes reported back to the observer.
    pub fn is_protocol_violation(&self) -> bool {
        !matches!(
            self,
            PackStreamError::Unpackable(_) | PackStreamError::ByteArraysNotSupported
        )
    }
}

impl fmt::Display for PackStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackStreamError::UnexpectedEof => write!(f, "Unexpected end of PackStream data"),
            PackStreamError::UnknownMarker(m) => {
                write!(f, "Unknown PackStream marker: 0x{:02X}", m)
            }
            PackStreamError::InvalidUtf8(e) => write!(f, "Invalid UTF-8 in string: {}", e),
            PackStreamError::InvalidMapKey => write!(f, "Map keys must be strings"),
            PackStreamError::ValueTooLarge(kind, size) => {
                write!(f, "{} too large to pack: {} entries", kind, size)
            }
            PackStreamError::InvalidStructure(msg) => write!(f, "Invalid structure: {}", msg),
            PackStreamError::Unpackable(msg) => write!(f, "Unable to pack value: {}", msg),
            PackStreamError::ByteArraysNotSupported => {
                write!(f, "Byte arrays are not supported by the database this driver is connected to")
            }
        }
    }
}

impl std::error::Error for PackStreamError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn roundtrip(value: Value) {
        let bytes = pack_to_bytes(&value).unwrap();
        let decoded = unpack_from_bytes(&bytes).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn test_roundtrip_null() {
        roundtrip(Value::Null);
    }

    #[test]
    fn test_roundtrip_bool() {
        roundtrip(Value::Boolean(true));
        roundtrip(Value::Boolean(false));
    }

    #[test]
    fn test_roundtrip_int_preserves_64_bit_precision() {
        for v in [
            0i64,
            1,
            -1,
            127,
            -16,
            128,
            -17,
            -128,
            -129,
            32_767,
            -32_768,
            1_000_000,
            (1 << 53) + 1,
            -(1 << 53) - 1,
            i64::MAX,
            i64::MIN,
        ] {
            roundtrip(Value::Integer(v));
        }
    }

    #[test]
    fn test_roundtrip_float() {
        for v in [0.0f64, 1.0, -1.0, 3.14159, f64::MAX, f64::MIN, f64::EPSILON] {
            roundtrip(Value::Float(v));
        }
    }

    #[test]
    fn test_roundtrip_string() {
        for s in ["", "a", "hello", "åäö", &"x".repeat(100), &"y".repeat(70_000)] {
            roundtrip(Value::String(s.to_string()));
        }
    }

    #[test]
    fn test_roundtrip_bytes() {
        for b in [vec![], vec![1u8], vec![1, 2, 3], vec![0u8; 300]] {
            roundtrip(Value::Bytes(b));
        }
    }

    #[test]
    fn test_roundtrip_list() {
        roundtrip(Value::List(vec![
            Value::Integer(1),
            Value::String("two".into()),
            Value::Boolean(true),
            Value::Null,
            Value::Float(0.5),
        ]));
    }

    #[test]
    fn test_roundtrip_map() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), Value::Integer(1));
        map.insert("b".to_string(), Value::String("hello".into()));
        map.insert("c".to_string(), Value::List(vec![Value::Null]));
        roundtrip(Value::Map(map));
    }

    #[test]
    fn test_roundtrip_structure() {
        roundtrip(Value::Structure(Structure::new(
            0x01,
            vec![
                Value::String("agent".into()),
                Value::Map(HashMap::new()),
            ],
        )));
    }

    #[test]
    fn test_roundtrip_deeply_nested() {
        let mut inner = HashMap::new();
        inner.insert(
            "items".to_string(),
            Value::List(vec![Value::Integer(1), Value::Integer(2)]),
        );
        roundtrip(Value::List(vec![
            Value::Map(inner.clone()),
            Value::Map(inner),
        ]));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PackStreamError::UnknownMarker(0xDE).to_string(),
            "Unknown PackStream marker: 0xDE"
        );
        assert!(PackStreamError::ByteArraysNotSupported
            .to_string()
            .contains("not supported"));
    }

    #[test]
    fn test_protocol_violation_classification() {
        assert!(PackStreamError::UnknownMarker(0xDE).is_protocol_violation());
        assert!(PackStreamError::UnexpectedEof.is_protocol_violation());
        assert!(PackStreamError::ValueTooLarge("list", 0).is_protocol_violation());
        assert!(!PackStreamError::Unpackable("node".into()).is_protocol_violation());
        assert!(!PackStreamError::ByteArraysNotSupported.is_protocol_violation());
    }
}
