//! HTTP transport for the IPFS daemon API.
//!
//! Requests are POSTed with `reqwest` on a private current-thread tokio
//! runtime, so callers stay fully synchronous. Each transport owns its
//! runtime, client and abort signal; the runtime and client are built on
//! the first request.
//!
//! Like `reqwest::blocking`, the transport must not be used from a thread
//! that is driving an async runtime: `fetch` refuses with
//! [`TransportError::InsideAsyncRuntime`] there. Dropping it inside a
//! runtime is fine.

use std::io::Write;
use std::sync::OnceLock;

use futures::StreamExt;
use ipfs_core::{AbortSignal, FileSource, FileUpload, Transport, TransportError};
use reqwest::multipart::{Form, Part};

/// Multipart field every uploaded part is sent under.
const UPLOAD_FIELD: &str = "file";
const UPLOAD_MIME: &str = "application/octet-stream";

#[derive(Debug)]
struct Session {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
}

#[derive(Debug)]
pub struct HttpTransport {
    verbose: bool,
    abort: AbortSignal,
    session: OnceLock<Session>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_verbose(false)
    }

    /// With `verbose`, connection-level traffic is logged through `tracing`.
    pub fn with_verbose(verbose: bool) -> Self {
        Self {
            verbose,
            abort: AbortSignal::new(),
            session: OnceLock::new(),
        }
    }

    fn session(&self) -> Result<&Session, TransportError> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = reqwest::Client::builder()
            .connection_verbose(self.verbose)
            .build()
            .map_err(TransportError::http)?;

        // A concurrent first request may have won; its session is as good as ours.
        Ok(self.session.get_or_init(|| Session { runtime, client }))
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        // A runtime may not be dropped where blocking is forbidden
        if let Some(session) = self.session.take()
            && tokio::runtime::Handle::try_current().is_ok()
        {
            session.runtime.shutdown_background();
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn fetch(
        &self,
        url: &str,
        files: &[FileUpload],
        sink: &mut dyn Write,
    ) -> Result<(), TransportError> {
        self.abort.check()?;
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(TransportError::InsideAsyncRuntime);
        }
        let session = self.session()?;

        tracing::debug!(url, parts = files.len(), "sending request");
        session.runtime.block_on(async {
            tokio::select! {
                biased;
                _ = self.abort.aborted() => {
                    tracing::debug!(url, "request aborted");
                    Err(TransportError::Aborted)
                }
                result = exchange(&session.client, url, files, sink) => result,
            }
        })
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
        Box::new(HttpTransport::with_verbose(self.verbose))
    }
}

/// Loads one part off the runtime's blocking pool, so an abort does not
/// wait for a slow read to finish.
async fn read_upload(file: &FileUpload) -> Result<Vec<u8>, TransportError> {
    match &file.source {
        FileSource::Contents(contents) => Ok(contents.to_vec()),
        FileSource::Path(path) => tokio::fs::read(path)
            .await
            .map_err(|source| TransportError::Upload {
                path: path.clone(),
                source,
            }),
    }
}

async fn exchange(
    client: &reqwest::Client,
    url: &str,
    files: &[FileUpload],
    sink: &mut dyn Write,
) -> Result<(), TransportError> {
    let mut request = client.post(url);
    if !files.is_empty() {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(read_upload(file).await?)
                .file_name(file.name.clone())
                .mime_str(UPLOAD_MIME)
                .map_err(TransportError::http)?;
            form = form.part(UPLOAD_FIELD, part);
        }
        request = request.multipart(form);
    }

    let response = request.send().await.map_err(TransportError::http)?;
    let status = response.status();
    tracing::debug!(url, %status, "daemon replied");

    if !status.is_success() {
        let body = response.bytes().await.map_err(TransportError::http)?;
        let err = TransportError::from_daemon_reply(status.as_u16(), &body);
        tracing::warn!(url, error = %err, "daemon rejected request");
        return Err(err);
    }

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        sink.write_all(&chunk.map_err(TransportError::http)?)?;
    }
    Ok(())
}
