//! PackStream value tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::structures::{Node, Path, Relationship, UnboundRelationship};

/// A PackStream value.
///
/// This is the dynamically typed tree the codec encodes and decodes. The
/// graph variants only ever appear on the decode side: the server sends
/// them inside records, and the packer rejects them in query parameters.
/// Values are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Byte array
    Bytes(Vec<u8>),
    /// List of values
    List(Vec<Value>),
    /// Map of string keys to values
    Map(HashMap<String, Value>),
    /// Generic tagged structure
    Structure(Structure),
    /// Hydrated graph node
    Node(Node),
    /// Hydrated graph relationship
    Relationship(Relationship),
    /// Relationship not yet bound to its endpoint nodes
    UnboundRelationship(UnboundRelationship),
    /// Hydrated graph path
    Path(Path),
}

/// A tagged record with a one-byte signature and a fixed field list.
///
/// Structures carry both protocol messages and domain objects on the
/// wire; the signature discriminates the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Signature byte identifying the structure type
    pub signature: u8,
    /// Structure fields
    pub fields: Vec<Value>,
}

impl Structure {
    /// Create a new structure with the given signature and fields.
    pub fn new(signature: u8, fields: Vec<Value>) -> Self {
        Self { signature, fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the structure has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bytes reference.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as list reference.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get as map reference.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get as structure reference.
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Value::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as node reference.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Try to get as relationship reference.
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Value::Relationship(r) => Some(r),
            _ => None,
        }
    }

    /// Try to get as path reference.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    /// The variant name, for error messages and debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Structure(_) => "Structure",
            Value::Node(_) => "Node",
            Value::Relationship(_) => "Relationship",
            Value::UnboundRelationship(_) => "UnboundRelationship",
            Value::Path(_) => "Path",
        }
    }
}

// Conversion traits
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(v: HashMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<Structure> for Value {
    fn from(v: Structure) -> Self {
        Value::Structure(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null() {
        let v = Value::Null;
        assert!(v.is_null());
        assert_eq!(v.type_name(), "Null");
    }

    #[test]
    fn test_boolean() {
        let v = Value::Boolean(true);
        assert_eq!(v.as_bool(), Some(true));
        assert!(!v.is_null());
    }

    #[test]
    fn test_integer() {
        let v = Value::Integer(42);
        assert_eq!(v.as_int(), Some(42));
        assert_eq!(v.as_float(), Some(42.0));
    }

    #[test]
    fn test_float() {
        let v = Value::Float(3.14);
        assert_eq!(v.as_float(), Some(3.14));
        assert_eq!(v.as_int(), None);
    }

    #[test]
    fn test_string() {
        let v = Value::String("hello".to_string());
        assert_eq!(v.as_str(), Some("hello"));
    }

    #[test]
    fn test_bytes() {
        let v = Value::Bytes(vec![1, 2, 3]);
        assert_eq!(v.as_bytes(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_list() {
        let v = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
        let list = v.as_list().unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_map() {
        let mut map = HashMap::new();
        map.insert("key".to_string(), Value::Integer(42));
        let v = Value::Map(map);
        let m = v.as_map().unwrap();
        assert_eq!(m.get("key").unwrap().as_int(), Some(42));
    }

    #[test]
    fn test_structure() {
        let s = Structure::new(0x4E, vec![Value::Integer(1)]);
        assert_eq!(s.signature, 0x4E);
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());

        let v = Value::Structure(s);
        assert!(v.as_structure().is_some());
    }

    #[test]
    fn test_graph_accessors() {
        let node = Node::new(1, vec!["Person".to_string()], HashMap::new());
        let v = Value::Node(node);
        assert!(v.as_node().is_some());
        assert!(v.as_relationship().is_none());
        assert_eq!(v.type_name(), "Node");
    }

    #[test]
    fn test_from_conversions() {
        let _: Value = true.into();
        let _: Value = 42i64.into();
        let _: Value = 42i32.into();
        let _: Value = 3.14f64.into();
        let _: Value = "hello".into();
        let _: Value = String::from("hello").into();
        let _: Value = vec![1u8, 2, 3].into();
        let _: Value = Structure::new(0x01, vec![]).into();
    }
}
