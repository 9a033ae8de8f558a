//! Bolt v1 response messages.
//!
//! Response messages are sent from the server to the client. The unpacker
//! decodes them as generic structures; this layer gives them types before
//! the connection routes them to observers.

use std::collections::HashMap;
use std::fmt;

use super::signature;
use crate::bolt::packstream::{PackStreamError, Structure, Value};

/// All Bolt v1 response messages.
#[derive(Debug, Clone)]
pub enum BoltResponse {
    /// SUCCESS - Request completed, with summary metadata
    Success(SuccessMessage),
    /// RECORD - One result record
    Record(RecordMessage),
    /// FAILURE - Request failed
    Failure(FailureMessage),
    /// IGNORED - Request skipped because the connection is in a failed state
    Ignored,
}

impl BoltResponse {
    /// The message signature.
    pub fn signature(&self) -> u8 {
        match self {
            BoltResponse::Success(_) => signature::SUCCESS,
            BoltResponse::Record(_) => signature::RECORD,
            BoltResponse::Failure(_) => signature::FAILURE,
            BoltResponse::Ignored => signature::IGNORED,
        }
    }

    /// Message name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BoltResponse::Success(_) => "SUCCESS",
            BoltResponse::Record(_) => "RECORD",
            BoltResponse::Failure(_) => "FAILURE",
            BoltResponse::Ignored => "IGNORED",
        }
    }

    /// Check if this is a success response.
    pub fn is_success(&self) -> bool {
        matches!(self, BoltResponse::Success(_))
    }

    /// Check if this is a failure response.
    pub fn is_failure(&self) -> bool {
        matches!(self, BoltResponse::Failure(_))
    }

    /// Check if this is a record response.
    pub fn is_record(&self) -> bool {
        matches!(self, BoltResponse::Record(_))
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        match self {
            BoltResponse::Success(msg) => msg.to_structure(),
            BoltResponse::Record(msg) => msg.to_structure(),
            BoltResponse::Failure(msg) => msg.to_structure(),
            BoltResponse::Ignored => Structure::new(signature::IGNORED, vec![]),
        }
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        match s.signature {
            signature::SUCCESS => Ok(BoltResponse::Success(SuccessMessage::from_structure(s)?)),
            signature::RECORD => Ok(BoltResponse::Record(RecordMessage::from_structure(s)?)),
            signature::FAILURE => Ok(BoltResponse::Failure(FailureMessage::from_structure(s)?)),
            signature::IGNORED => Ok(BoltResponse::Ignored),
            _ => Err(PackStreamError::InvalidStructure(format!(
                "Unknown response message signature: 0x{:02X}",
                s.signature
            ))),
        }
    }
}

/// SUCCESS message - Request completed with summary metadata.
#[derive(Debug, Clone, Default)]
pub struct SuccessMessage {
    /// Response metadata
    pub metadata: HashMap<String, Value>,
}

impl SuccessMessage {
    /// Create a SUCCESS message with empty metadata.
    pub fn new() -> Self {
        Self {
            metadata: HashMap::new(),
        }
    }

    /// Create a SUCCESS message with metadata.
    pub fn with_metadata(metadata: HashMap<String, Value>) -> Self {
        Self { metadata }
    }

    /// Add a metadata entry.
    pub fn add(&mut self, key: &str, value: Value) {
        self.metadata.insert(key.to_string(), value);
    }

    /// Get a metadata entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Server name and version from an INIT success.
    pub fn server(&self) -> Option<&str> {
        self.metadata.get("server").and_then(|v| v.as_str())
    }

    /// Field names from a RUN success.
    pub fn fields(&self) -> Option<Vec<String>> {
        self.metadata.get("fields").and_then(|v| {
            v.as_list().map(|list| {
                list.iter()
                    .filter_map(|item| item.as_str().map(|s| s.to_string()))
                    .collect()
            })
        })
    }

    /// Bookmark from a streaming success.
    pub fn bookmark(&self) -> Option<&str> {
        self.metadata.get("bookmark").and_then(|v| v.as_str())
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        Structure::new(
            signature::SUCCESS,
            vec![Value::Map(self.metadata.clone())],
        )
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        if s.signature != signature::SUCCESS {
            return Err(PackStreamError::InvalidStructure(
                "Expected SUCCESS signature".to_string(),
            ));
        }

        let metadata = if !s.fields.is_empty() {
            s.fields[0].as_map().cloned().unwrap_or_default()
        } else {
            HashMap::new()
        };

        Ok(Self { metadata })
    }
}

/// RECORD message - One result record.
#[derive(Debug, Clone, Default)]
pub struct RecordMessage {
    /// Field values, positionally matched to the RUN success `fields` list
    pub fields: Vec<Value>,
}

impl RecordMessage {
    /// Create a new RECORD message.
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at the given index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        Structure::new(
            signature::RECORD,
            vec![Value::List(self.fields.clone())],
        )
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        if s.signature != signature::RECORD {
            return Err(PackStreamError::InvalidStructure(
                "Expected RECORD signature".to_string(),
            ));
        }

        let fields = match s.fields.first() {
            Some(Value::List(list)) => list.clone(),
            Some(_) => {
                return Err(PackStreamError::InvalidStructure(
                    "RECORD fields must be list".to_string(),
                ))
            }
            None => Vec::new(),
        };

        Ok(Self { fields })
    }
}

/// FAILURE message - Request failed.
#[derive(Debug, Clone)]
pub struct FailureMessage {
    /// Server error code, `Neo.{classification}.{category}.{title}`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FailureMessage {
    /// Create a new FAILURE message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// The classification segment of the code.
    pub fn classification(&self) -> &str {
        self.code.split('.').nth(1).unwrap_or("Unknown")
    }

    /// Check if this is a client error.
    pub fn is_client_error(&self) -> bool {
        self.code.contains("ClientError")
    }

    /// Check if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        self.code.contains("TransientError")
    }

    /// Check if this is a database error.
    pub fn is_database_error(&self) -> bool {
        self.code.contains("DatabaseError")
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        let mut metadata = HashMap::new();
        metadata.insert("code".to_string(), Value::String(self.code.clone()));
        metadata.insert("message".to_string(), Value::String(self.message.clone()));
        Structure::new(signature::FAILURE, vec![Value::Map(metadata)])
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        if s.signature != signature::FAILURE {
            return Err(PackStreamError::InvalidStructure(
                "Expected FAILURE signature".to_string(),
            ));
        }

        let metadata = s.fields.first().and_then(|v| v.as_map()).ok_or_else(|| {
            PackStreamError::InvalidStructure("FAILURE requires metadata map".to_string())
        })?;

        let code = metadata
            .get("code")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                PackStreamError::InvalidStructure("FAILURE requires code".to_string())
            })?
            .to_string();

        let message = metadata
            .get("message")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                PackStreamError::InvalidStructure("FAILURE requires message".to_string())
            })?
            .to_string();

        Ok(Self { code, message })
    }
}

impl fmt::Display for FailureMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
