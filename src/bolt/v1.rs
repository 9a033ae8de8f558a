//! Bolt v1 protocol façade.
//!
//! A thin request layer over a pre-established, framed connection. Each
//! operation builds one or more request messages and hands them to the
//! connection together with the observer that will receive the matching
//! response events. The façade owns no transport state; flushing and
//! response routing belong to the connection.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::{BoltError, BoltResult};
use super::message::{BoltRequest, BoltResponse, InitMessage, RunMessage};
use super::packstream::Value;

/// Events produced by the server in response to one request message.
pub trait ResponseObserver {
    /// One result record arrived.
    fn on_next(&mut self, fields: Vec<Value>);
    /// The request completed; `metadata` is the SUCCESS summary.
    fn on_completed(&mut self, metadata: HashMap<String, Value>);
    /// The request failed.
    fn on_error(&mut self, error: BoltError);
}

/// Observer handle shared between the messages of one operation.
///
/// A RUN and its PULL_ALL report to the same observer, so observers are
/// reference-counted. The codec layer is single-threaded by contract,
/// hence `Rc` rather than an atomic.
pub type SharedObserver = Rc<RefCell<dyn ResponseObserver>>;

/// Wrap an observer for use with the façade.
pub fn shared_observer<O: ResponseObserver + 'static>(observer: O) -> SharedObserver {
    Rc::new(RefCell::new(observer))
}

/// The connection the façade writes to.
///
/// Implementations queue the request for sending, remember the observer
/// for response routing, and transmit the queue when `flush` is set.
pub trait BoltConnection {
    /// Queue one request message with its observer; transmit when `flush`
    /// is set.
    fn write(
        &mut self,
        request: BoltRequest,
        observer: SharedObserver,
        flush: bool,
    ) -> BoltResult<()>;

    /// Mark the connection broken; no further messages may be sent.
    fn mark_fatal(&mut self, error: &BoltError);
}

/// Configuration of an explicit transaction.
///
/// Bolt v1 cannot express any of it; the façade rejects non-empty
/// configurations.
#[derive(Debug, Clone, Default)]
pub struct TransactionConfig {
    /// Transaction timeout
    pub timeout: Option<Duration>,
    /// Transaction metadata
    pub metadata: HashMap<String, Value>,
}

impl TransactionConfig {
    /// Create an empty configuration.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// True when nothing is configured.
    pub fn is_empty(&self) -> bool {
        self.timeout.is_none() && self.metadata.is_empty()
    }
}

/// Bookmarks carried between transactions for causal chaining.
///
/// v1 consumes bookmarks only when beginning an explicit transaction,
/// where they become BEGIN statement parameters; the RUN path accepts
/// them syntactically and ignores them.
#[derive(Debug, Clone, Default)]
pub struct Bookmark {
    values: Vec<String>,
}

impl Bookmark {
    /// Create an empty bookmark.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a bookmark from the values observed so far.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// True when no bookmark value is held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The most recent bookmark value.
    pub fn latest(&self) -> Option<&str> {
        self.values.last().map(String::as_str)
    }

    /// All held values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The BEGIN statement parameters carrying this bookmark.
    pub fn as_begin_parameters(&self) -> HashMap<String, Value> {
        let mut parameters = HashMap::new();
        if let Some(latest) = self.latest() {
            parameters.insert("bookmark".to_string(), Value::String(latest.to_string()));
            parameters.insert(
                "bookmarks".to_string(),
                Value::List(
                    self.values
                        .iter()
                        .map(|v| Value::String(v.clone()))
                        .collect(),
                ),
            );
        }
        parameters
    }
}

/// Bolt v1 request/response façade over a [`BoltConnection`].
#[derive(Debug)]
pub struct BoltProtocolV1<C: BoltConnection> {
    connection: C,
}

impl<C: BoltConnection> BoltProtocolV1<C> {
    /// Create a façade over the given connection.
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// The underlying connection, mutably.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Consume the façade and return the connection.
    pub fn into_connection(self) -> C {
        self.connection
    }

    /// Send an INIT message and flush.
    pub fn initialize(
        &mut self,
        client_name: &str,
        auth_token: HashMap<String, Value>,
        observer: SharedObserver,
    ) -> BoltResult<()> {
        debug!(client_name, "sending INIT");
        self.connection.write(
            BoltRequest::Init(InitMessage::new(client_name, auth_token)),
            observer,
            true,
        )
    }

    /// Send a RUN followed by PULL_ALL, flushing after the pair.
    ///
    /// `bookmark` is accepted for interface compatibility and ignored:
    /// v1 only consumes bookmarks in
    /// [`begin_transaction`](Self::begin_transaction). A non-empty
    /// `tx_config` is a capability violation: the connection is marked
    /// fatal, the observer notified, and the error returned.
    pub fn run(
        &mut self,
        statement: &str,
        parameters: HashMap<String, Value>,
        bookmark: &Bookmark,
        tx_config: &TransactionConfig,
        observer: SharedObserver,
    ) -> BoltResult<()> {
        let _ = bookmark;
        self.verify_tx_config_empty(tx_config, &observer)?;
        debug!(statement, "sending RUN + PULL_ALL");
        self.connection.write(
            BoltRequest::Run(RunMessage::new(statement).with_parameters(parameters)),
            observer.clone(),
            false,
        )?;
        self.connection.write(BoltRequest::PullAll, observer, true)
    }

    /// Begin an explicit transaction: `RUN "BEGIN"` with the bookmark
    /// parameters plus PULL_ALL, neither flushed. The first statement of
    /// the transaction carries the flush.
    pub fn begin_transaction(
        &mut self,
        bookmark: &Bookmark,
        tx_config: &TransactionConfig,
        observer: SharedObserver,
    ) -> BoltResult<()> {
        self.verify_tx_config_empty(tx_config, &observer)?;
        debug!("sending BEGIN + PULL_ALL");
        self.connection.write(
            BoltRequest::Run(
                RunMessage::new("BEGIN").with_parameters(bookmark.as_begin_parameters()),
            ),
            observer.clone(),
            false,
        )?;
        self.connection.write(BoltRequest::PullAll, observer, false)
    }

    /// Commit the open transaction.
    pub fn commit_transaction(&mut self, observer: SharedObserver) -> BoltResult<()> {
        self.run(
            "COMMIT",
            HashMap::new(),
            &Bookmark::empty(),
            &TransactionConfig::empty(),
            observer,
        )
    }

    /// Roll back the open transaction.
    pub fn rollback_transaction(&mut self, observer: SharedObserver) -> BoltResult<()> {
        self.run(
            "ROLLBACK",
            HashMap::new(),
            &Bookmark::empty(),
            &TransactionConfig::empty(),
            observer,
        )
    }

    /// Send a RESET and flush.
    pub fn reset(&mut self, observer: SharedObserver) -> BoltResult<()> {
        debug!("sending RESET");
        self.connection.write(BoltRequest::Reset, observer, true)
    }

    /// Summary-metadata hook. v1 passes metadata through unchanged; later
    /// protocol versions reshape it here.
    pub fn transform_metadata(&self, metadata: HashMap<String, Value>) -> HashMap<String, Value> {
        metadata
    }

    /// Route one decoded response to its observer.
    ///
    /// IGNORED responses produce no event; the connection replays the
    /// pending failure when it acknowledges it.
    pub fn handle_response(&mut self, response: BoltResponse, observer: &SharedObserver) {
        match response {
            BoltResponse::Success(msg) => observer
                .borrow_mut()
                .on_completed(self.transform_metadata(msg.metadata)),
            BoltResponse::Record(msg) => observer.borrow_mut().on_next(msg.fields),
            BoltResponse::Failure(msg) => observer
                .borrow_mut()
                .on_error(BoltError::server(msg.code, msg.message)),
            BoltResponse::Ignored => {}
        }
    }

    /// Enforce the v1 precondition that no transaction configuration is
    /// present. On violation the connection is marked fatal, the observer
    /// is notified exactly once, and the error is returned to the caller.
    fn verify_tx_config_empty(
        &mut self,
        tx_config: &TransactionConfig,
        observer: &SharedObserver,
    ) -> BoltResult<()> {
        if tx_config.is_empty() {
            return Ok(());
        }
        const MESSAGE: &str = "transaction configuration is not supported by the connected \
                               database: upgrade the server to a version that speaks a newer \
                               Bolt protocol";
        warn!("rejecting transaction configuration on Bolt v1");
        let error = BoltError::capability(MESSAGE);
        self.connection.mark_fatal(&error);
        observer.borrow_mut().on_error(error);
        Err(BoltError::capability(MESSAGE))
    }
}
