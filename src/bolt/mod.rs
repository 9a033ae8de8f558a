//! # Bolt v1 Protocol Implementation
//!
//! Client-side core of the Bolt binary protocol: the PackStream codec and
//! the v1 request façade.
//!
//! ## Overview
//!
//! Bolt frames PackStream-encoded messages over a chunked byte stream.
//! This module provides:
//!
//! - **PackStream** - binary serialization of the value tree, including
//!   graph structure hydration
//! - **Messages** - typed request and response messages
//! - **Façade** - the v1 operations (INIT, RUN, PULL_ALL, RESET and the
//!   explicit-transaction statements) over a framed connection
//! - **Channel** - the byte-channel contract the codec consumes
//!
//! The transport itself (sockets, chunking, handshake, response routing)
//! is owned by the enclosing connection; this layer is synchronous and
//! single-threaded, one codec per connection.
//!
//! ## Submodules
//!
//! - [`packstream`] - serialization/deserialization
//! - [`message`] - Bolt v1 message types
//! - [`v1`] - the protocol façade
//! - [`channel`] - byte-channel traits and the in-memory channel
//! - [`error`] - protocol error types

pub mod channel;
pub mod error;
pub mod message;
pub mod packstream;
pub mod v1;

pub use channel::{MemoryChannel, ReadChannel, WriteChannel};
pub use error::{BoltError, BoltResult, CLIENT_ERROR, PROTOCOL_ERROR, SERVICE_UNAVAILABLE};
pub use message::{
    AuthToken, BoltRequest, BoltResponse, FailureMessage, InitMessage, RecordMessage, RunMessage,
    SuccessMessage,
};
pub use packstream::{
    pack_to_bytes, unpack_from_bytes, Node, PackStreamError, Packer, Path, PathSegment,
    Relationship, Structure, UnboundRelationship, Unpacker, Value,
};
pub use v1::{
    shared_observer, BoltConnection, BoltProtocolV1, Bookmark, ResponseObserver, SharedObserver,
    TransactionConfig,
};
