//! In-memory stand-in for an IPFS daemon.
//!
//! [`MemoryDaemon`] holds one scripted [`Reply`] per endpoint and records
//! every request it receives. [`MemoryTransport`] implements
//! [`ipfs_core::Transport`] on top of it, so client code can be exercised
//! without a network. Several transports may share one daemon, just like
//! several sessions talk to one real node; each transport still has its own
//! abort state.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use dashmap::DashMap;
use ipfs_core::{AbortSignal, FileUpload, Transport, TransportError};
use serde_json::Value;
use url::Url;

/// Scripted answer for one endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this body.
    Body(Bytes),
    /// Non-success status with this body.
    Error { status: u16, body: Bytes },
    /// Never answers; the request only returns once it is aborted.
    HangUntilAborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPart {
    pub name: String,
    pub contents: Bytes,
}

/// A request as the daemon saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    /// Endpoint path below the API prefix, e.g. `routing/findpeer`.
    pub endpoint: String,
    /// Decoded query pairs, including the default flags.
    pub query: Vec<(String, String)>,
    pub parts: Vec<RecordedPart>,
}

impl RecordedRequest {
    /// First value of the named query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All values of the named query parameter, in order.
    pub fn params(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn args(&self) -> Vec<&str> {
        self.params("arg")
    }
}

#[derive(Debug)]
pub struct MemoryDaemon {
    api_path: String,
    replies: DashMap<String, Reply>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryDaemon {
    /// Creates a daemon serving below the default `/api/v0` path.
    pub fn new() -> Self {
        Self::with_api_path("/api/v0")
    }

    pub fn with_api_path(api_path: impl Into<String>) -> Self {
        Self {
            api_path: api_path.into(),
            replies: DashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sets the reply for `endpoint`, replacing any previous one.
    pub fn reply(&self, endpoint: &str, reply: Reply) {
        self.replies.insert(endpoint.to_string(), reply);
    }

    pub fn reply_raw(&self, endpoint: &str, body: impl Into<Bytes>) {
        self.reply(endpoint, Reply::Body(body.into()));
    }

    pub fn reply_json(&self, endpoint: &str, value: &Value) {
        self.reply_raw(endpoint, value.to_string());
    }

    /// Replies with one JSON document per line.
    pub fn reply_lines(&self, endpoint: &str, lines: &[Value]) {
        let body: String = lines.iter().map(|line| format!("{line}\n")).collect();
        self.reply_raw(endpoint, body);
    }

    /// Replies the way the daemon reports a failed command.
    pub fn reply_error(&self, endpoint: &str, status: u16, message: &str) {
        let body = serde_json::json!({"Message": message, "Code": 0, "Type": "error"});
        self.reply(
            endpoint,
            Reply::Error {
                status,
                body: body.to_string().into(),
            },
        );
    }

    pub fn hang(&self, endpoint: &str) {
        self.reply(endpoint, Reply::HangUntilAborted);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    fn endpoint_for(&self, url: &Url) -> Option<String> {
        url.path()
            .strip_prefix(self.api_path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
    }
}

impl Default for MemoryDaemon {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct MemoryTransport {
    daemon: Arc<MemoryDaemon>,
    abort: AbortSignal,
}

impl MemoryTransport {
    pub fn new(daemon: Arc<MemoryDaemon>) -> Self {
        Self {
            daemon,
            abort: AbortSignal::new(),
        }
    }

    pub fn daemon(&self) -> &Arc<MemoryDaemon> {
        &self.daemon
    }
}

impl Transport for MemoryTransport {
    fn fetch(
        &self,
        url: &str,
        files: &[FileUpload],
        sink: &mut dyn Write,
    ) -> Result<(), TransportError> {
        self.abort.check()?;

        let parsed = Url::parse(url).map_err(TransportError::http)?;
        let parts = files
            .iter()
            .map(|file| {
                Ok(RecordedPart {
                    name: file.name.clone(),
                    contents: file.read()?,
                })
            })
            .collect::<Result<Vec<_>, TransportError>>()?;
        let endpoint = self.daemon.endpoint_for(&parsed);

        self.daemon.record(RecordedRequest {
            url: url.to_string(),
            endpoint: endpoint.clone().unwrap_or_default(),
            query: parsed.query_pairs().into_owned().collect(),
            parts,
        });

        let reply = endpoint
            .as_deref()
            .and_then(|endpoint| self.daemon.replies.get(endpoint))
            .map(|entry| entry.value().clone());

        match reply {
            Some(Reply::Body(body)) => {
                sink.write_all(&body)?;
                Ok(())
            }
            Some(Reply::Error { status, body }) => {
                Err(TransportError::from_daemon_reply(status, &body))
            }
            Some(Reply::HangUntilAborted) => {
                tracing::debug!(url, "holding request until aborted");
                futures::executor::block_on(self.abort.aborted());
                Err(TransportError::Aborted)
            }
            None => Err(TransportError::Daemon {
                status: 404,
                message: "404 page not found".to_string(),
            }),
        }
    }

    fn url_encode(&self, input: &str) -> String {
        ipfs_core::url_encode(input)
    }

    fn abort_in_flight(&self) {
        self.abort.abort();
    }

    fn reset_after_abort(&self) {
        self.abort.reset();
    }

    fn box_clone(&self) -> Box<dyn Transport> {
        Box::new(MemoryTransport::new(self.daemon.clone()))
    }
}
