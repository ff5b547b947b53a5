use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use bytes::Bytes;

/// Performs the HTTP exchange for one request.
///
/// Implementations own their abort state: `abort_in_flight` may be called
/// from another thread while `fetch` blocks, and must make that `fetch`
/// return [`TransportError::Aborted`] promptly. Until `reset_after_abort`
/// is called, further `fetch` calls fail with the same error.
pub trait Transport: fmt::Debug + Send + Sync + 'static {
    /// Sends a request to `url`, uploading `files` as a multipart body when
    /// non-empty, and writes the raw response body into `sink`.
    fn fetch(
        &self,
        url: &str,
        files: &[FileUpload],
        sink: &mut dyn Write,
    ) -> Result<(), TransportError>;

    /// Percent-encodes one query component.
    fn url_encode(&self, input: &str) -> String;

    fn abort_in_flight(&self);

    fn reset_after_abort(&self);

    /// Returns an independent transport with equivalent configuration and
    /// its own, cleared, abort state.
    fn box_clone(&self) -> Box<dyn Transport>;
}

/// Query-component encoding used by the bundled transports.
///
/// Everything outside `[A-Za-z0-9*-._]` is escaped; spaces become `+`,
/// which the daemon's query parser decodes back to a space.
pub fn url_encode(input: &str) -> String {
    url::form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// One named item of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Logical name; the daemon reports results under this name.
    pub name: String,
    pub source: FileSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Literal payload.
    Contents(Bytes),
    /// Local file, read when the request is sent.
    Path(PathBuf),
}

impl FileUpload {
    pub fn contents(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Contents(contents.into()),
        }
    }

    pub fn path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Path(path.into()),
        }
    }

    /// Loads the payload, reading it from disk for [`FileSource::Path`].
    pub fn read(&self) -> Result<Bytes, TransportError> {
        match &self.source {
            FileSource::Contents(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => std::fs::read(path)
                .map(Bytes::from)
                .map_err(|source| TransportError::Upload {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    #[error("request aborted")]
    Aborted,

    #[error("daemon replied with HTTP {status}: {message}")]
    Daemon { status: u16, message: String },

    #[error("failed to read upload {path:?}: {source}")]
    Upload {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A blocking transport was called from a thread driving an async runtime.
    #[error("blocking request issued from inside an async runtime")]
    InsideAsyncRuntime,

    #[error("HTTP exchange failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TransportError {
    pub fn http(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Http(Box::new(err))
    }

    /// Builds a [`TransportError::Daemon`] from an error reply body.
    ///
    /// The daemon answers failed commands with
    /// `{"Message": "...", "Code": 0, "Type": "error"}`; anything else is
    /// reported verbatim.
    pub fn from_daemon_reply(status: u16, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct DaemonError {
            #[serde(rename = "Message")]
            message: String,
        }

        let message = match serde_json::from_slice::<DaemonError>(body) {
            Ok(reply) => reply.message,
            Err(_) => String::from_utf8_lossy(body).trim().to_string(),
        };
        Self::Daemon { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encode_escapes_reserved() {
        assert_eq!(url_encode("a&b=c d/e"), "a%26b%3Dc+d%2Fe");
        assert_eq!(url_encode("QmHash"), "QmHash");
        assert_eq!(url_encode("ü"), "%C3%BC");
    }

    #[test]
    fn test_daemon_reply_message() {
        let err = TransportError::from_daemon_reply(
            500,
            br#"{"Message":"invalid path \"foo\"","Code":0,"Type":"error"}"#,
        );
        assert_eq!(err.to_string(), r#"daemon replied with HTTP 500: invalid path "foo""#);

        let err = TransportError::from_daemon_reply(404, b"404 page not found\n");
        assert!(matches!(
            err,
            TransportError::Daemon { status: 404, ref message } if message == "404 page not found"
        ));
    }

    #[test]
    fn test_read_contents_and_missing_path() {
        let part = FileUpload::contents("foo.txt", "abcd");
        assert_eq!(part.read().unwrap(), Bytes::from_static(b"abcd"));

        let part = FileUpload::path("bar.txt", "/nonexistent/ipfs-core-test/bar.txt");
        assert!(matches!(part.read(), Err(TransportError::Upload { .. })));
    }
}
