//! PackStream unpacker.

use std::collections::HashMap;

use super::marker::*;
use super::structures::{Node, Path, PathSegment, Relationship, UnboundRelationship};
use super::types::{Structure, Value};
use super::PackStreamError;
use crate::bolt::channel::{MemoryChannel, ReadChannel};
use crate::temporal::BigInt;

/// PackStream decoder reading values from a [`ReadChannel`].
///
/// `unpack` consumes exactly the bytes of one value. Structure signatures
/// for the graph types hydrate into [`Node`], [`Relationship`],
/// [`UnboundRelationship`] and [`Path`]; any other signature yields a
/// generic [`Structure`].
#[derive(Debug, Clone, Default)]
pub struct Unpacker {
    disable_lossless_integers: bool,
}

impl Unpacker {
    /// Create an unpacker that preserves full 64-bit integer precision.
    pub fn new() -> Self {
        Self {
            disable_lossless_integers: false,
        }
    }

    /// Create an unpacker that surfaces integers as floats, with values
    /// beyond the 53-bit safe range becoming the matching infinity.
    pub fn with_lossless_integers_disabled() -> Self {
        Self {
            disable_lossless_integers: true,
        }
    }

    /// Whether integers are converted to floats on the way out.
    pub fn lossless_integers_disabled(&self) -> bool {
        self.disable_lossless_integers
    }

    /// Decode the next value from the channel.
    pub fn unpack<C: ReadChannel>(&self, channel: &mut C) -> Result<Value, PackStreamError> {
        let marker = channel.read_u8()?;
        match marker {
            0x00..=TINY_INT_MAX => Ok(self.integer(BigInt::new(marker as i64))),
            TINY_INT_MIN..=0xFF => Ok(self.integer(BigInt::new(marker as i8 as i64))),
            0x80..=0x8F => self.unpack_string((marker - TINY_STRING_BASE) as usize, channel),
            0x90..=0x9F => self.unpack_list((marker - TINY_LIST_BASE) as usize, channel),
            0xA0..=0xAF => self.unpack_map((marker - TINY_MAP_BASE) as usize, channel),
            0xB0..=0xBF => self.unpack_structure((marker - TINY_STRUCT_BASE) as usize, channel),

            NULL => Ok(Value::Null),
            TRUE => Ok(Value::Boolean(true)),
            FALSE => Ok(Value::Boolean(false)),
            FLOAT_64 => Ok(Value::Float(channel.read_f64()?)),

            INT_8 => Ok(self.integer(BigInt::new(channel.read_i8()? as i64))),
            INT_16 => Ok(self.integer(BigInt::new(channel.read_i16()? as i64))),
            INT_32 => Ok(self.integer(BigInt::new(channel.read_i32()? as i64))),
            INT_64 => {
                let high = channel.read_i32()?;
                let low = channel.read_u32()?;
                Ok(self.integer(BigInt::from_high_low(high, low)))
            }

            STRING_8 => {
                let len = channel.read_u8()? as usize;
                self.unpack_string(len, channel)
            }
            STRING_16 => {
                let len = channel.read_u16()? as usize;
                self.unpack_string(len, channel)
            }
            STRING_32 => {
                let len = channel.read_u32()? as usize;
                self.unpack_string(len, channel)
            }

            BYTES_8 => {
                let len = channel.read_u8()? as usize;
                Ok(Value::Bytes(channel.read_bytes(len)?))
            }
            BYTES_16 => {
                let len = channel.read_u16()? as usize;
                Ok(Value::Bytes(channel.read_bytes(len)?))
            }
            BYTES_32 => {
                let len = channel.read_u32()? as usize;
                Ok(Value::Bytes(channel.read_bytes(len)?))
            }

            LIST_8 => {
                let len = channel.read_u8()? as usize;
                self.unpack_list(len, channel)
            }
            LIST_16 => {
                let len = channel.read_u16()? as usize;
                self.unpack_list(len, channel)
            }
            LIST_32 => {
                let len = channel.read_u32()? as usize;
                self.unpack_list(len, channel)
            }

            MAP_8 => {
                let len = channel.read_u8()? as usize;
                self.unpack_map(len, channel)
            }
            MAP_16 => {
                let len = channel.read_u16()? as usize;
                self.unpack_map(len, channel)
            }
            MAP_32 => {
                let len = channel.read_u32()? as usize;
                self.unpack_map(len, channel)
            }

            STRUCT_8 => {
                let len = channel.read_u8()? as usize;
                self.unpack_structure(len, channel)
            }
            STRUCT_16 => {
                let len = channel.read_u16()? as usize;
                self.unpack_structure(len, channel)
            }

            // Everything else, including the reserved bytes and the absent
            // STRUCT_32, is not valid PackStream v1.
            _ => Err(PackStreamError::UnknownMarker(marker)),
        }
    }

    fn integer(&self, value: BigInt) -> Value {
        if self.disable_lossless_integers {
            Value::Float(value.to_f64_or_infinity())
        } else {
            Value::Integer(value.value())
        }
    }

    fn unpack_string<C: ReadChannel>(
        &self,
        len: usize,
        channel: &mut C,
    ) -> Result<Value, PackStreamError> {
        let bytes = channel.read_bytes(len)?;
        let s = String::from_utf8(bytes)
            .map_err(|e| PackStreamError::InvalidUtf8(e.to_string()))?;
        Ok(Value::String(s))
    }

    fn unpack_list<C: ReadChannel>(
        &self,
        len: usize,
        channel: &mut C,
    ) -> Result<Value, PackStreamError> {
        let mut items = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            items.push(self.unpack(channel)?);
        }
        Ok(Value::List(items))
    }

    fn unpack_map<C: ReadChannel>(
        &self,
        len: usize,
        channel: &mut C,
    ) -> Result<Value, PackStreamError> {
        let mut map = HashMap::with_capacity(len.min(1024));
        for _ in 0..len {
            let key = match self.unpack(channel)? {
                Value::String(s) => s,
                _ => return Err(PackStreamError::InvalidMapKey),
            };
            let value = self.unpack(channel)?;
            // Duplicate keys: last write wins.
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn unpack_structure<C: ReadChannel>(
        &self,
        size: usize,
        channel: &mut C,
    ) -> Result<Value, PackStreamError> {
        let signature = channel.read_u8()?;
        match signature {
            NODE_SIGNATURE => {
                verify_struct_size("Node", NODE_STRUCT_SIZE, size)?;
                Ok(Value::Node(self.unpack_node(channel)?))
            }
            RELATIONSHIP_SIGNATURE => {
                verify_struct_size("Relationship", RELATIONSHIP_STRUCT_SIZE, size)?;
                Ok(Value::Relationship(self.unpack_relationship(channel)?))
            }
            UNBOUND_RELATIONSHIP_SIGNATURE => {
                verify_struct_size(
                    "UnboundRelationship",
                    UNBOUND_RELATIONSHIP_STRUCT_SIZE,
                    size,
                )?;
                Ok(Value::UnboundRelationship(
                    self.unpack_unbound_relationship(channel)?,
                ))
            }
            PATH_SIGNATURE => {
                verify_struct_size("Path", PATH_STRUCT_SIZE, size)?;
                Ok(Value::Path(self.unpack_path(channel)?))
            }
            _ => {
                let mut fields = Vec::with_capacity(size.min(64));
                for _ in 0..size {
                    fields.push(self.unpack(channel)?);
                }
                Ok(Value::Structure(Structure::new(signature, fields)))
            }
        }
    }

    fn unpack_node<C: ReadChannel>(&self, channel: &mut C) -> Result<Node, PackStreamError> {
        let identity = self.unpack_identity(channel, "Node identity")?;
        let labels = self.unpack_string_list(channel, "Node labels")?;
        let properties = self.unpack_properties(channel, "Node properties")?;
        Ok(Node::new(identity, labels, properties))
    }

    fn unpack_relationship<C: ReadChannel>(
        &self,
        channel: &mut C,
    ) -> Result<Relationship, PackStreamError> {
        let identity = self.unpack_identity(channel, "Relationship identity")?;
        let start = self.unpack_identity(channel, "Relationship start node")?;
        let end = self.unpack_identity(channel, "Relationship end node")?;
        let rel_type = self.unpack_type_string(channel, "Relationship type")?;
        let properties = self.unpack_properties(channel, "Relationship properties")?;
        Ok(Relationship::new(identity, start, end, rel_type, properties))
    }

    fn unpack_unbound_relationship<C: ReadChannel>(
        &self,
        channel: &mut C,
    ) -> Result<UnboundRelationship, PackStreamError> {
        let identity = self.unpack_identity(channel, "UnboundRelationship identity")?;
        let rel_type = self.unpack_type_string(channel, "UnboundRelationship type")?;
        let properties = self.unpack_properties(channel, "UnboundRelationship properties")?;
        Ok(UnboundRelationship::new(identity, rel_type, properties))
    }

    fn unpack_path<C: ReadChannel>(&self, channel: &mut C) -> Result<Path, PackStreamError> {
        let nodes = match self.unpack(channel)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::Node(n) => Ok(n),
                    other => Err(invalid_field("Path nodes", "Node", other.type_name())),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => return Err(invalid_field("Path nodes", "List", other.type_name())),
        };
        let rels = match self.unpack(channel)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::UnboundRelationship(r) => Ok(r),
                    other => Err(invalid_field(
                        "Path relationships",
                        "UnboundRelationship",
                        other.type_name(),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(invalid_field(
                    "Path relationships",
                    "List",
                    other.type_name(),
                ))
            }
        };
        let sequence = match self.unpack(channel)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| {
                    as_wire_int(&v)
                        .ok_or_else(|| invalid_field("Path sequence", "Integer", v.type_name()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => return Err(invalid_field("Path sequence", "List", other.type_name())),
        };
        build_path(nodes, rels, &sequence)
    }

    fn unpack_identity<C: ReadChannel>(
        &self,
        channel: &mut C,
        what: &'static str,
    ) -> Result<i64, PackStreamError> {
        let value = self.unpack(channel)?;
        as_wire_int(&value).ok_or_else(|| invalid_field(what, "Integer", value.type_name()))
    }

    fn unpack_type_string<C: ReadChannel>(
        &self,
        channel: &mut C,
        what: &'static str,
    ) -> Result<String, PackStreamError> {
        match self.unpack(channel)? {
            Value::String(s) => Ok(s),
            other => Err(invalid_field(what, "String", other.type_name())),
        }
    }

    fn unpack_string_list<C: ReadChannel>(
        &self,
        channel: &mut C,
        what: &'static str,
    ) -> Result<Vec<String>, PackStreamError> {
        match self.unpack(channel)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    other => Err(invalid_field(what, "String", other.type_name())),
                })
                .collect(),
            other => Err(invalid_field(what, "List", other.type_name())),
        }
    }

    fn unpack_properties<C: ReadChannel>(
        &self,
        channel: &mut C,
        what: &'static str,
    ) -> Result<HashMap<String, Value>, PackStreamError> {
        match self.unpack(channel)? {
            Value::Map(m) => Ok(m),
            other => Err(invalid_field(what, "Map", other.type_name())),
        }
    }
}

/// A relationship slot of a path under hydration: unbound until first
/// referenced, then bound once and shared by every later reference.
enum RelationshipSlot {
    Unbound(UnboundRelationship),
    Bound(Relationship),
}

/// Rebuild a [`Path`] from its wire parts.
///
/// `sequence` holds `(rel_index, node_index)` pairs. Relationship indices
/// are one-based and signed: a positive index names a relationship
/// traversed forward from the previous node, a negative one a
/// relationship traversed in reverse. Node indices address `nodes`
/// directly. Each relationship is bound at its first reference and later
/// references reuse the same bound instance.
pub fn build_path(
    nodes: Vec<Node>,
    rels: Vec<UnboundRelationship>,
    sequence: &[i64],
) -> Result<Path, PackStreamError> {
    if sequence.len() % 2 != 0 {
        return Err(PackStreamError::InvalidStructure(format!(
            "Path sequence must hold index pairs, received {} indices",
            sequence.len()
        )));
    }
    let start = nodes
        .first()
        .cloned()
        .ok_or_else(|| PackStreamError::InvalidStructure("Path requires at least one node".into()))?;

    let mut slots: Vec<RelationshipSlot> =
        rels.into_iter().map(RelationshipSlot::Unbound).collect();
    let mut segments = Vec::with_capacity(sequence.len() / 2);
    let mut prev = start.clone();

    for pair in sequence.chunks_exact(2) {
        let (rel_index, node_index) = (pair[0], pair[1]);
        let next = nodes
            .get(node_index as usize)
            .cloned()
            .ok_or_else(|| {
                PackStreamError::InvalidStructure(format!(
                    "Path sequence names node {} but only {} nodes were sent",
                    node_index,
                    nodes.len()
                ))
            })?;

        if rel_index == 0 {
            return Err(PackStreamError::InvalidStructure(
                "Path relationship index must not be zero".into(),
            ));
        }
        let slot_index = if rel_index > 0 {
            rel_index as usize - 1
        } else {
            (-rel_index) as usize - 1
        };
        if slot_index >= slots.len() {
            return Err(PackStreamError::InvalidStructure(format!(
                "Path sequence names relationship {} but only {} relationships were sent",
                rel_index,
                slots.len()
            )));
        }

        let relationship = match &slots[slot_index] {
            RelationshipSlot::Bound(r) => r.clone(),
            RelationshipSlot::Unbound(unbound) => {
                let bound = if rel_index > 0 {
                    unbound.clone().bind(prev.identity, next.identity)
                } else {
                    unbound.clone().bind(next.identity, prev.identity)
                };
                slots[slot_index] = RelationshipSlot::Bound(bound.clone());
                bound
            }
        };

        segments.push(PathSegment {
            start: prev,
            relationship,
            end: next.clone(),
        });
        prev = next;
    }

    Ok(Path::new(start, prev, segments))
}

fn verify_struct_size(
    name: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), PackStreamError> {
    if expected != actual {
        return Err(PackStreamError::InvalidStructure(format!(
            "{} structure requires {} fields, received {}",
            name, expected, actual
        )));
    }
    Ok(())
}

fn invalid_field(what: &str, expected: &str, actual: &str) -> PackStreamError {
    PackStreamError::InvalidStructure(format!(
        "{} must be {}, received {}",
        what, expected, actual
    ))
}

/// Read an integer out of a decoded field, tolerating the float form
/// produced when lossless integers are disabled.
fn as_wire_int(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) if f.is_finite() => Some(*f as i64),
        _ => None,
    }
}

/// Decode a single value from a byte slice.
pub fn unpack_from_bytes(data: &[u8]) -> Result<Value, PackStreamError> {
    let mut channel = MemoryChannel::from_bytes(data);
    Unpacker::new().unpack(&mut channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bolt::packstream::packer::pack_to_bytes;
    use crate::temporal::MAX_SAFE_INTEGER;

    #[test]
    fn test_unpack_null() {
        assert_eq!(unpack_from_bytes(&[0xC0]).unwrap(), Value::Null);
    }

    #[test]
    fn test_unpack_bool() {
        assert_eq!(unpack_from_bytes(&[0xC3]).unwrap(), Value::Boolean(true));
        assert_eq!(unpack_from_bytes(&[0xC2]).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_unpack_tiny_int() {
        assert_eq!(unpack_from_bytes(&[0x00]).unwrap(), Value::Integer(0));
        assert_eq!(unpack_from_bytes(&[0x01]).unwrap(), Value::Integer(1));
        assert_eq!(unpack_from_bytes(&[0x7F]).unwrap(), Value::Integer(127));
        assert_eq!(unpack_from_bytes(&[0xF0]).unwrap(), Value::Integer(-16));
        assert_eq!(unpack_from_bytes(&[0xFF]).unwrap(), Value::Integer(-1));
    }

    #[test]
    fn test_unpack_sized_ints() {
        assert_eq!(unpack_from_bytes(&[0xC8, 0xEF]).unwrap(), Value::Integer(-17));
        assert_eq!(
            unpack_from_bytes(&[0xC9, 0x00, 0xC8]).unwrap(),
            Value::Integer(200)
        );
        assert_eq!(
            unpack_from_bytes(&[0xCA, 0x00, 0x01, 0x86, 0xA0]).unwrap(),
            Value::Integer(100_000)
        );
        assert_eq!(
            unpack_from_bytes(&[0xCB, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap(),
            Value::Integer(i64::MAX)
        );
        assert_eq!(
            unpack_from_bytes(&[0xCB, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_unpack_float() {
        let mut data = vec![0xC1];
        data.extend_from_slice(&1.5f64.to_be_bytes());
        assert_eq!(unpack_from_bytes(&data).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn test_unpack_string() {
        assert_eq!(
            unpack_from_bytes(&[0x85, b'h', b'e', b'l', b'l', b'o']).unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(
            unpack_from_bytes(&[0x80]).unwrap(),
            Value::String(String::new())
        );
    }

    #[test]
    fn test_unpack_invalid_utf8() {
        let err = unpack_from_bytes(&[0x82, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, PackStreamError::InvalidUtf8(_)));
    }

    #[test]
    fn test_unpack_bytes() {
        assert_eq!(
            unpack_from_bytes(&[0xCC, 0x03, 1, 2, 3]).unwrap(),
            Value::Bytes(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_unpack_list() {
        assert_eq!(
            unpack_from_bytes(&[0x93, 0x01, 0x02, 0x03]).unwrap(),
            Value::List(vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
            ])
        );
    }

    #[test]
    fn test_unpack_map() {
        let value = unpack_from_bytes(&[0xA1, 0x81, b'k', 0x81, b'v']).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k").unwrap().as_str(), Some("v"));
    }

    #[test]
    fn test_unpack_map_duplicate_keys_last_wins() {
        // {"a": 1, "a": 2}
        let value = unpack_from_bytes(&[0xA2, 0x81, b'a', 0x01, 0x81, b'a', 0x02]).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").unwrap().as_int(), Some(2));
    }

    #[test]
    fn test_unpack_map_non_string_key() {
        let err = unpack_from_bytes(&[0xA1, 0x01, 0x81, b'v']).unwrap_err();
        assert!(matches!(err, PackStreamError::InvalidMapKey));
    }

    #[test]
    fn test_unpack_generic_structure() {
        let value = unpack_from_bytes(&[0xB1, 0x66, 0x2A]).unwrap();
        let s = value.as_structure().unwrap();
        assert_eq!(s.signature, 0x66);
        assert_eq!(s.fields, vec![Value::Integer(42)]);
    }

    #[test]
    fn test_unpack_node() {
        // Node(id=42, labels=["Person"], properties={})
        let data = [
            0xB3, 0x4E, 0x2A, 0x91, 0x86, 0x50, 0x65, 0x72, 0x73, 0x6F, 0x6E, 0xA0,
        ];
        let value = unpack_from_bytes(&data).unwrap();
        let node = value.as_node().unwrap();
        assert_eq!(node.identity, 42);
        assert_eq!(node.labels, vec!["Person"]);
        assert!(node.properties.is_empty());
    }

    #[test]
    fn test_unpack_relationship() {
        // Relationship(id=1, start=2, end=3, type="KNOWS", properties={})
        let data = [
            0xB5, 0x52, 0x01, 0x02, 0x03, 0x85, b'K', b'N', b'O', b'W', b'S', 0xA0,
        ];
        let value = unpack_from_bytes(&data).unwrap();
        let rel = value.as_relationship().unwrap();
        assert_eq!(rel.identity, 1);
        assert_eq!(rel.start_node_identity, 2);
        assert_eq!(rel.end_node_identity, 3);
        assert_eq!(rel.rel_type, "KNOWS");
    }

    #[test]
    fn test_unpack_unbound_relationship() {
        let data = [0xB3, 0x72, 0x07, 0x84, b'L', b'I', b'K', b'E', 0xA0];
        let value = unpack_from_bytes(&data).unwrap();
        match value {
            Value::UnboundRelationship(rel) => {
                assert_eq!(rel.identity, 7);
                assert_eq!(rel.rel_type, "LIKE");
            }
            other => panic!("expected UnboundRelationship, got {:?}", other),
        }
    }

    #[test]
    fn test_node_wrong_field_count() {
        // Node with 2 fields instead of 3.
        let data = [0xB2, 0x4E, 0x2A, 0x90];
        let err = unpack_from_bytes(&data).unwrap_err();
        match err {
            PackStreamError::InvalidStructure(msg) => {
                assert!(msg.contains("Node"), "message: {}", msg);
                assert!(msg.contains('3'), "message: {}", msg);
                assert!(msg.contains('2'), "message: {}", msg);
            }
            other => panic!("expected InvalidStructure, got {:?}", other),
        }
    }

    #[test]
    fn test_node_wrong_field_type() {
        // Node whose identity is a string.
        let data = [0xB3, 0x4E, 0x81, b'x', 0x90, 0xA0];
        let err = unpack_from_bytes(&data).unwrap_err();
        assert!(matches!(err, PackStreamError::InvalidStructure(_)));
    }

    #[test]
    fn test_unknown_marker() {
        for marker in [0xC4u8, 0xC5, 0xC6, 0xC7, 0xCF, 0xD3, 0xD7, 0xDB, 0xDE, 0xDF, 0xE5] {
            let err = unpack_from_bytes(&[marker]).unwrap_err();
            match err {
                PackStreamError::UnknownMarker(m) => assert_eq!(m, marker),
                other => panic!("expected UnknownMarker, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_marker_reported_in_hex() {
        let err = unpack_from_bytes(&[0xDE]).unwrap_err();
        assert!(err.to_string().contains("0xDE"), "message: {}", err);
    }

    #[test]
    fn test_truncated_input() {
        for data in [&[0xC9][..], &[0xC1, 0x00][..], &[0x85, b'h', b'i'][..]] {
            let err = unpack_from_bytes(data).unwrap_err();
            assert!(matches!(err, PackStreamError::UnexpectedEof));
        }
    }

    #[test]
    fn test_lossless_integers_disabled() {
        let unpacker = Unpacker::with_lossless_integers_disabled();

        let mut channel = MemoryChannel::from_bytes(&[0x2A]);
        assert_eq!(unpacker.unpack(&mut channel).unwrap(), Value::Float(42.0));

        // A value beyond 2^53 becomes infinity.
        let mut data = vec![0xCB];
        data.extend_from_slice(&(MAX_SAFE_INTEGER + 1).to_be_bytes());
        let mut channel = MemoryChannel::from_bytes(&data);
        assert_eq!(
            unpacker.unpack(&mut channel).unwrap(),
            Value::Float(f64::INFINITY)
        );

        let mut data = vec![0xCB];
        data.extend_from_slice(&i64::MIN.to_be_bytes());
        let mut channel = MemoryChannel::from_bytes(&data);
        assert_eq!(
            unpacker.unpack(&mut channel).unwrap(),
            Value::Float(f64::NEG_INFINITY)
        );
    }

    fn wire_node(id: i64) -> Value {
        Value::Structure(Structure::new(
            NODE_SIGNATURE,
            vec![
                Value::Integer(id),
                Value::List(vec![]),
                Value::Map(HashMap::new()),
            ],
        ))
    }

    fn wire_unbound_rel(id: i64, rel_type: &str) -> Value {
        Value::Structure(Structure::new(
            UNBOUND_RELATIONSHIP_SIGNATURE,
            vec![
                Value::Integer(id),
                Value::String(rel_type.to_string()),
                Value::Map(HashMap::new()),
            ],
        ))
    }

    fn wire_path(nodes: Vec<Value>, rels: Vec<Value>, sequence: Vec<i64>) -> Vec<u8> {
        let path = Value::Structure(Structure::new(
            PATH_SIGNATURE,
            vec![
                Value::List(nodes),
                Value::List(rels),
                Value::List(sequence.into_iter().map(Value::Integer).collect()),
            ],
        ));
        pack_to_bytes(&path).unwrap().to_vec()
    }

    #[test]
    fn test_path_hydration() {
        // nodes = [A(1), B(2), C(3)], rels = [r1(10), r2(11)],
        // sequence = [1, 1, -2, 2]: A -r1-> B <-r2- C.
        let data = wire_path(
            vec![wire_node(1), wire_node(2), wire_node(3)],
            vec![wire_unbound_rel(10, "R1"), wire_unbound_rel(11, "R2")],
            vec![1, 1, -2, 2],
        );
        let value = unpack_from_bytes(&data).unwrap();
        let path = value.as_path().unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path.start.identity, 1);
        assert_eq!(path.end.identity, 3);

        let first = &path.segments[0];
        assert_eq!(first.start.identity, 1);
        assert_eq!(first.end.identity, 2);
        assert_eq!(first.relationship.identity, 10);
        assert_eq!(first.relationship.start_node_identity, 1);
        assert_eq!(first.relationship.end_node_identity, 2);

        // r2 was traversed in reverse, so it is bound C -> B.
        let second = &path.segments[1];
        assert_eq!(second.start.identity, 2);
        assert_eq!(second.end.identity, 3);
        assert_eq!(second.relationship.identity, 11);
        assert_eq!(second.relationship.start_node_identity, 3);
        assert_eq!(second.relationship.end_node_identity, 2);
    }

    #[test]
    fn test_path_repeated_relationship_shares_bound_instance() {
        // A -r1-> B, then back over the same relationship: B -r1- A.
        let data = wire_path(
            vec![wire_node(1), wire_node(2)],
            vec![wire_unbound_rel(10, "R1")],
            vec![1, 1, -1, 0],
        );
        let value = unpack_from_bytes(&data).unwrap();
        let path = value.as_path().unwrap();

        assert_eq!(path.len(), 2);
        // The second reference reuses the instance bound by the first.
        assert_eq!(path.segments[0].relationship, path.segments[1].relationship);
        assert_eq!(path.segments[1].relationship.start_node_identity, 1);
        assert_eq!(path.segments[1].relationship.end_node_identity, 2);
    }

    #[test]
    fn test_empty_path() {
        let data = wire_path(vec![wire_node(5)], vec![], vec![]);
        let value = unpack_from_bytes(&data).unwrap();
        let path = value.as_path().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.start.identity, 5);
        assert_eq!(path.end.identity, 5);
    }

    #[test]
    fn test_path_bad_sequence() {
        // Odd number of indices.
        let data = wire_path(vec![wire_node(1)], vec![wire_unbound_rel(10, "R")], vec![1]);
        assert!(matches!(
            unpack_from_bytes(&data),
            Err(PackStreamError::InvalidStructure(_))
        ));

        // Relationship index out of range.
        let data = wire_path(
            vec![wire_node(1), wire_node(2)],
            vec![wire_unbound_rel(10, "R")],
            vec![2, 1],
        );
        assert!(matches!(
            unpack_from_bytes(&data),
            Err(PackStreamError::InvalidStructure(_))
        ));

        // Node index out of range.
        let data = wire_path(
            vec![wire_node(1)],
            vec![wire_unbound_rel(10, "R")],
            vec![1, 3],
        );
        assert!(matches!(
            unpack_from_bytes(&data),
            Err(PackStreamError::InvalidStructure(_))
        ));

        // Zero relationship index.
        let data = wire_path(
            vec![wire_node(1), wire_node(2)],
            vec![wire_unbound_rel(10, "R")],
            vec![0, 1],
        );
        assert!(matches!(
            unpack_from_bytes(&data),
            Err(PackStreamError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_unpack_reads_exactly_one_value() {
        let mut channel = MemoryChannel::from_bytes(&[0x01, 0x02, 0x03]);
        let unpacker = Unpacker::new();
        assert_eq!(unpacker.unpack(&mut channel).unwrap(), Value::Integer(1));
        assert_eq!(channel.len(), 2);
        assert_eq!(unpacker.unpack(&mut channel).unwrap(), Value::Integer(2));
        assert_eq!(unpacker.unpack(&mut channel).unwrap(), Value::Integer(3));
        assert!(channel.is_empty());
    }
}
