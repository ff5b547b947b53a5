use std::io::Write;

use ipfs_core::{EndpointRequest, FileUpload, Result, Transport, TransportError, decode_json};
use ipfs_transport_http::HttpTransport;
use serde_json::Value;

use crate::config::ClientConfig;

/// A session with one IPFS daemon.
///
/// All endpoint calls block the calling thread until the daemon has
/// answered. [`Client::abort`] may be called from another thread to
/// interrupt a call in flight; the session then refuses calls until
/// [`Client::reset`].
///
/// A session runs one call at a time. Clone it to issue calls concurrently:
/// each clone gets its own transport and abort state.
///
/// With the default HTTP transport, calls must not be made from inside an
/// async runtime; they fail with [`TransportError::InsideAsyncRuntime`].
/// Use `tokio::task::spawn_blocking` or a dedicated thread instead.
#[derive(Debug)]
pub struct Client {
    url_prefix: String,
    timeout: Option<String>,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Creates a session that talks HTTP to the configured daemon.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::with_verbose(config.verbose))
    }

    pub fn with_transport(config: &ClientConfig, transport: impl Transport) -> Self {
        Self::with_boxed_transport(config, Box::new(transport))
    }

    /// Like [`Client::with_transport`], for a transport that is already
    /// boxed, e.g. one returned by [`Transport::box_clone`].
    pub fn with_boxed_transport(config: &ClientConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            url_prefix: config.url_prefix(),
            timeout: Some(config.timeout.clone()).filter(|t| !t.is_empty()),
            transport,
        }
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Interrupts the call currently in flight on this session, if any.
    pub fn abort(&self) {
        self.transport.abort_in_flight();
    }

    /// Clears a previous [`Client::abort`] so the session accepts calls again.
    pub fn reset(&self) {
        self.transport.reset_after_abort();
    }

    /// Renders the full URL for `request` in this session.
    pub fn url(&self, request: &EndpointRequest) -> String {
        request.url(&self.url_prefix, self.timeout.as_deref(), |s| {
            self.transport.url_encode(s)
        })
    }

    pub(crate) fn fetch_raw(&self, request: EndpointRequest, files: &[FileUpload]) -> Result<Vec<u8>> {
        let url = self.url(&request);
        tracing::debug!(endpoint = request.path(), parts = files.len(), "calling daemon");

        let mut body = Vec::new();
        self.transport.fetch(&url, files, &mut body)?;
        tracing::trace!(endpoint = request.path(), bytes = body.len(), "reply received");
        Ok(body)
    }

    /// Fetches a reply that is one JSON document.
    pub(crate) fn fetch_json(&self, request: EndpointRequest, files: &[FileUpload]) -> Result<Value> {
        decode_json(&self.fetch_raw(request, files)?)
    }

    /// Copies the complete reply into `sink` once the exchange succeeded.
    pub(crate) fn fetch_to_sink(&self, request: EndpointRequest, sink: &mut dyn Write) -> Result<()> {
        let body = self.fetch_raw(request, &[])?;
        sink.write_all(&body).map_err(TransportError::from)?;
        Ok(())
    }
}

impl Clone for Client {
    fn clone(&self) -> Self {
        Self {
            url_prefix: self.url_prefix.clone(),
            timeout: self.timeout.clone(),
            transport: self.transport.box_clone(),
        }
    }
}
