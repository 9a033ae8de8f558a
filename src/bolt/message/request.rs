//! Bolt v1 request messages.
//!
//! Request messages are sent from the client to the server.

use std::collections::HashMap;

use super::signature;
use crate::bolt::packstream::{PackStreamError, Structure, Value};

/// Authentication token for the INIT message.
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Authentication scheme (e.g., "basic", "none")
    pub scheme: String,
    /// Principal (username)
    pub principal: Option<String>,
    /// Credentials (password)
    pub credentials: Option<String>,
    /// Realm
    pub realm: Option<String>,
    /// Additional scheme-specific parameters
    pub parameters: HashMap<String, Value>,
}

impl AuthToken {
    /// Create a basic auth token.
    pub fn basic(principal: &str, credentials: &str) -> Self {
        Self {
            scheme: "basic".to_string(),
            principal: Some(principal.to_string()),
            credentials: Some(credentials.to_string()),
            realm: None,
            parameters: HashMap::new(),
        }
    }

    /// Create an anonymous auth token (no auth).
    pub fn none() -> Self {
        Self {
            scheme: "none".to_string(),
            principal: None,
            credentials: None,
            realm: None,
            parameters: HashMap::new(),
        }
    }

    /// Set the realm.
    pub fn with_realm(mut self, realm: &str) -> Self {
        self.realm = Some(realm.to_string());
        self
    }

    /// Convert to the INIT auth map.
    pub fn to_map(&self) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        map.insert("scheme".to_string(), Value::String(self.scheme.clone()));
        if let Some(ref p) = self.principal {
            map.insert("principal".to_string(), Value::String(p.clone()));
        }
        if let Some(ref c) = self.credentials {
            map.insert("credentials".to_string(), Value::String(c.clone()));
        }
        if let Some(ref r) = self.realm {
            map.insert("realm".to_string(), Value::String(r.clone()));
        }
        for (k, v) in &self.parameters {
            map.insert(k.clone(), v.clone());
        }
        map
    }
}

/// All Bolt v1 request messages.
#[derive(Debug, Clone)]
pub enum BoltRequest {
    /// INIT - Initialize connection
    Init(InitMessage),
    /// RUN - Execute a statement
    Run(RunMessage),
    /// PULL_ALL - Stream every record of the last result
    PullAll,
    /// DISCARD_ALL - Drop every record of the last result
    DiscardAll,
    /// ACK_FAILURE - Acknowledge a FAILURE response
    AckFailure,
    /// RESET - Return the connection to a clean state
    Reset,
}

impl BoltRequest {
    /// The message signature.
    pub fn signature(&self) -> u8 {
        match self {
            BoltRequest::Init(_) => signature::INIT,
            BoltRequest::Run(_) => signature::RUN,
            BoltRequest::PullAll => signature::PULL_ALL,
            BoltRequest::DiscardAll => signature::DISCARD_ALL,
            BoltRequest::AckFailure => signature::ACK_FAILURE,
            BoltRequest::Reset => signature::RESET,
        }
    }

    /// Message name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BoltRequest::Init(_) => "INIT",
            BoltRequest::Run(_) => "RUN",
            BoltRequest::PullAll => "PULL_ALL",
            BoltRequest::DiscardAll => "DISCARD_ALL",
            BoltRequest::AckFailure => "ACK_FAILURE",
            BoltRequest::Reset => "RESET",
        }
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        match self {
            BoltRequest::Init(msg) => msg.to_structure(),
            BoltRequest::Run(msg) => msg.to_structure(),
            BoltRequest::PullAll => Structure::new(signature::PULL_ALL, vec![]),
            BoltRequest::DiscardAll => Structure::new(signature::DISCARD_ALL, vec![]),
            BoltRequest::AckFailure => Structure::new(signature::ACK_FAILURE, vec![]),
            BoltRequest::Reset => Structure::new(signature::RESET, vec![]),
        }
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        match s.signature {
            signature::INIT => Ok(BoltRequest::Init(InitMessage::from_structure(s)?)),
            signature::RUN => Ok(BoltRequest::Run(RunMessage::from_structure(s)?)),
            signature::PULL_ALL => Ok(BoltRequest::PullAll),
            signature::DISCARD_ALL => Ok(BoltRequest::DiscardAll),
            signature::ACK_FAILURE => Ok(BoltRequest::AckFailure),
            signature::RESET => Ok(BoltRequest::Reset),
            _ => Err(PackStreamError::InvalidStructure(format!(
                "Unknown request message signature: 0x{:02X}",
                s.signature
            ))),
        }
    }
}

/// INIT message - Initialize connection.
#[derive(Debug, Clone)]
pub struct InitMessage {
    /// Client name and version, e.g. `packbolt/0.1`
    pub client_name: String,
    /// Authentication token map
    pub auth_token: HashMap<String, Value>,
}

impl InitMessage {
    /// Create a new INIT message.
    pub fn new(client_name: &str, auth_token: HashMap<String, Value>) -> Self {
        Self {
            client_name: client_name.to_string(),
            auth_token,
        }
    }

    /// Create an INIT message from an [`AuthToken`].
    pub fn with_auth(client_name: &str, auth: &AuthToken) -> Self {
        Self::new(client_name, auth.to_map())
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        Structure::new(
            signature::INIT,
            vec![
                Value::String(self.client_name.clone()),
                Value::Map(self.auth_token.clone()),
            ],
        )
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        if s.signature != signature::INIT {
            return Err(PackStreamError::InvalidStructure(
                "Expected INIT signature".to_string(),
            ));
        }
        if s.fields.len() != 2 {
            return Err(PackStreamError::InvalidStructure(format!(
                "INIT requires 2 fields, received {}",
                s.fields.len()
            )));
        }

        let client_name = s.fields[0]
            .as_str()
            .ok_or_else(|| {
                PackStreamError::InvalidStructure("INIT client name must be string".to_string())
            })?
            .to_string();

        let auth_token = s.fields[1]
            .as_map()
            .ok_or_else(|| {
                PackStreamError::InvalidStructure("INIT auth token must be map".to_string())
            })?
            .clone();

        Ok(Self {
            client_name,
            auth_token,
        })
    }
}

/// RUN message - Execute a statement.
#[derive(Debug, Clone)]
pub struct RunMessage {
    /// Statement text
    pub statement: String,
    /// Statement parameters
    pub parameters: HashMap<String, Value>,
}

impl RunMessage {
    /// Create a new RUN message without parameters.
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_string(),
            parameters: HashMap::new(),
        }
    }

    /// Set statement parameters.
    pub fn with_parameters(mut self, parameters: HashMap<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Convert to a PackStream structure.
    pub fn to_structure(&self) -> Structure {
        Structure::new(
            signature::RUN,
            vec![
                Value::String(self.statement.clone()),
                Value::Map(self.parameters.clone()),
            ],
        )
    }

    /// Parse from a PackStream structure.
    pub fn from_structure(s: &Structure) -> Result<Self, PackStreamError> {
        if s.signature != signature::RUN {
            return Err(PackStreamError::InvalidStructure(
                "Expected RUN signature".to_string(),
            ));
        }
        if s.fields.len() != 2 {
            return Err(PackStreamError::InvalidStructure(format!(
                "RUN requires 2 fields, received {}",
                s.fields.len()
            )));
        }

        let statement = s.fields[0]
            .as_str()
            .ok_or_else(|| {
                PackStreamError::InvalidStructure("RUN statement must be string".to_string())
            })?
            .to_string();

        let parameters = s.fields[1]
            .as_map()
            .ok_or_else(|| {
                PackStreamError::InvalidStructure("RUN parameters must be map".to_string())
            })?
            .clone();

        Ok(Self {
            statement,
            parameters,
        })
    }
}
