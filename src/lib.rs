//! # packbolt
//!
//! PackStream v1 codec and Bolt v1 protocol core for graph database
//! clients.
//!
//! ## Features
//!
//! - **PackStream v1** - complete encoder and decoder for the
//!   self-describing binary serialization format, with minimal marker
//!   selection and full 64-bit integer precision
//! - **Graph Hydration** - nodes, relationships and paths rebuilt from
//!   their wire structures, including path segment inference from the
//!   traversal index sequence
//! - **Bolt v1 Façade** - INIT, RUN, PULL_ALL, RESET and the explicit
//!   transaction statements over a framed connection, with observer-based
//!   response dispatch
//! - **Temporal Conversions** - proleptic Gregorian calendar arithmetic
//!   and ISO-8601 rendering compatible with the server's JSR-310 model
//!
//! ## Encoding Values
//!
//! ```rust
//! use packbolt::{pack_to_bytes, unpack_from_bytes, Value};
//!
//! let value = Value::List(vec![
//!     Value::Integer(1),
//!     Value::String("two".to_string()),
//!     Value::Boolean(true),
//! ]);
//!
//! let bytes = pack_to_bytes(&value)?;
//! assert_eq!(unpack_from_bytes(&bytes)?, value);
//! # Ok::<(), packbolt::PackStreamError>(())
//! ```
//!
//! ## Streaming Through a Channel
//!
//! The codec reads and writes through the byte-channel traits the
//! chunked transport implements; [`MemoryChannel`] is the in-memory
//! stand-in:
//!
//! ```rust
//! use packbolt::{MemoryChannel, Packer, Unpacker, Value};
//!
//! let mut channel = MemoryChannel::new();
//! let packer = Packer::new();
//! packer.pack(&Value::Integer(42), &mut channel)?;
//!
//! let value = Unpacker::new().unpack(&mut channel)?;
//! assert_eq!(value, Value::Integer(42));
//! # Ok::<(), packbolt::PackStreamError>(())
//! ```
//!
//! ## Issuing Requests
//!
//! The v1 façade writes request messages to a connection you provide and
//! routes response events to observers:
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use packbolt::bolt::v1::{BoltProtocolV1, Bookmark, TransactionConfig};
//! # use packbolt::{BoltConnection, BoltRequest, BoltResult, SharedObserver};
//! # struct MyConnection;
//! # impl BoltConnection for MyConnection {
//! #     fn write(&mut self, _: BoltRequest, _: SharedObserver, _: bool) -> BoltResult<()> { Ok(()) }
//! #     fn mark_fatal(&mut self, _: &packbolt::BoltError) {}
//! # }
//! # fn observer() -> SharedObserver { unimplemented!() }
//!
//! let mut protocol = BoltProtocolV1::new(MyConnection);
//! protocol.initialize("packbolt/0.1", HashMap::new(), observer())?;
//! protocol.run(
//!     "MATCH (n) RETURN n",
//!     HashMap::new(),
//!     &Bookmark::empty(),
//!     &TransactionConfig::empty(),
//!     observer(),
//! )?;
//! # Ok::<(), packbolt::BoltError>(())
//! ```
//!
//! ## Modules
//!
//! - [`bolt`] - codec, messages and the protocol façade
//! - [`temporal`] - calendar values, conversions and formatting

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bolt;
pub mod temporal;

// Re-exports for convenience
pub use bolt::{
    pack_to_bytes, unpack_from_bytes, AuthToken, BoltConnection, BoltError, BoltProtocolV1,
    BoltRequest, BoltResponse, BoltResult, Bookmark, FailureMessage, InitMessage, MemoryChannel,
    Node, PackStreamError, Packer, Path, PathSegment, ReadChannel, RecordMessage, Relationship,
    ResponseObserver, RunMessage, SharedObserver, Structure, SuccessMessage, TransactionConfig,
    UnboundRelationship, Unpacker, Value, WriteChannel,
};
pub use temporal::{BigInt, Date, Duration, LocalDateTime, LocalTime};
