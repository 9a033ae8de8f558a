//! Graph value types hydrated from PackStream structures.
//!
//! The server ships graph entities as tagged structures; the unpacker
//! rehydrates them into the types here. They only travel server-to-client:
//! the packer refuses them in query parameters.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Value;

/// A node of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Server-assigned identity
    pub identity: i64,
    /// Node labels
    pub labels: Vec<String>,
    /// Node properties
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Create a new node.
    pub fn new(identity: i64, labels: Vec<String>, properties: HashMap<String, Value>) -> Self {
        Self {
            identity,
            labels,
            properties,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.identity)?;
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        write!(f, ")")
    }
}

/// A relationship bound to its start and end nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Server-assigned identity
    pub identity: i64,
    /// Identity of the start node
    pub start_node_identity: i64,
    /// Identity of the end node
    pub end_node_identity: i64,
    /// Relationship type
    pub rel_type: String,
    /// Relationship properties
    pub properties: HashMap<String, Value>,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(
        identity: i64,
        start_node_identity: i64,
        end_node_identity: i64,
        rel_type: String,
        properties: HashMap<String, Value>,
    ) -> Self {
        Self {
            identity,
            start_node_identity,
            end_node_identity,
            rel_type,
            properties,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})-[{}:{}]->({})",
            self.start_node_identity, self.identity, self.rel_type, self.end_node_identity
        )
    }
}

/// A relationship whose endpoints are not yet known.
///
/// Path structures ship relationships in this form; binding them to the
/// nodes named by the path sequence yields a full [`Relationship`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnboundRelationship {
    /// Server-assigned identity
    pub identity: i64,
    /// Relationship type
    pub rel_type: String,
    /// Relationship properties
    pub properties: HashMap<String, Value>,
}

impl UnboundRelationship {
    /// Create a new unbound relationship.
    pub fn new(identity: i64, rel_type: String, properties: HashMap<String, Value>) -> Self {
        Self {
            identity,
            rel_type,
            properties,
        }
    }

    /// Bind to the given start and end node identities.
    pub fn bind(self, start_node_identity: i64, end_node_identity: i64) -> Relationship {
        Relationship {
            identity: self.identity,
            start_node_identity,
            end_node_identity,
            rel_type: self.rel_type,
            properties: self.properties,
        }
    }
}

impl fmt::Display for UnboundRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-[{}:{}]-", self.identity, self.rel_type)
    }
}

/// One step of a path: a start node, the traversed relationship, and the
/// end node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Node the step starts from
    pub start: Node,
    /// Relationship traversed by the step
    pub relationship: Relationship,
    /// Node the step arrives at
    pub end: Node,
}

/// A path through the graph.
///
/// Invariant: consecutive segments share a node — `segments[i].end` equals
/// `segments[i + 1].start`, `start` is the first segment's start node and
/// `end` the last segment's end node (or `start` for an empty path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// First node of the path
    pub start: Node,
    /// Last node of the path
    pub end: Node,
    /// Steps of the path, in traversal order
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Create a path from its parts.
    pub fn new(start: Node, end: Node, segments: Vec<PathSegment>) -> Self {
        Self {
            start,
            end,
            segments,
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for a zero-length path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<path ({})-...->({}), {} segments>",
            self.start.identity,
            self.end.identity,
            self.segments.len()
        )
    }
}
