//! Contract checks shared by every `Transport`.
//!
//! [`TransportTests`] exercises URL encoding and the abort/reset/clone
//! behaviour the client relies on. None of the checks need a reachable
//! daemon; refused requests are aimed at a closed local port.
//!
//! Enable it from a transport crate's dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! ipfs_core = { workspace = true, features = ["testutil"] }
//! ```
//!
//! ```ignore
//! #[test]
//! fn test_contract() {
//!     let transport = MyTransport::new(...);
//!     ipfs_core::testutil::TransportTests::new(&transport).run_all().unwrap();
//! }
//! ```

use anyhow::{Result, anyhow, ensure};

use crate::request::EndpointRequest;
use crate::transport::{Transport, TransportError};

/// Values that must survive query encoding unchanged.
const AWKWARD_VALUES: &[&str] = &[
    "plain",
    "a&b=c",
    "with space",
    "/ipfs/QmHash/sub dir/file.txt",
    "100%",
    "plus+sign",
    "ünïcødé",
    "",
];

/// Contract test-suite for `Transport` implementations.
pub struct TransportTests<'a, T> {
    transport: &'a T,
    /// Where refused requests are sent; never actually contacted
    prefix: String,
}

impl<'a, T: Transport> TransportTests<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self::with_prefix(transport, "http://127.0.0.1:9/api/v0")
    }

    /// Create a suite that aims its refused requests below `prefix`.
    pub fn with_prefix(transport: &'a T, prefix: impl Into<String>) -> Self {
        Self {
            transport,
            prefix: prefix.into(),
        }
    }

    /// Run all tests.
    pub fn run_all(&self) -> Result<()> {
        self.test_url_encode_roundtrip()?;
        self.test_abort_refuses_until_reset()?;
        self.test_clone_has_own_abort_state()?;

        // Leave the transport usable for the caller
        self.transport.reset_after_abort();
        Ok(())
    }

    fn url(&self) -> String {
        EndpointRequest::new("version").url(&self.prefix, None, |s| self.transport.url_encode(s))
    }

    /// Encoded names and values decode back to the original pairs, in order.
    pub fn test_url_encode_roundtrip(&self) -> Result<()> {
        let mut request = EndpointRequest::new("version");
        for value in AWKWARD_VALUES {
            request = request.param(*value, *value);
        }
        let url = request.url(&self.prefix, Some("5s"), |s| self.transport.url_encode(s));

        let parsed = url::Url::parse(&url)?;
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().skip(3).collect();

        let mut expected: Vec<(String, String)> = AWKWARD_VALUES
            .iter()
            .map(|v| (v.to_string(), v.to_string()))
            .collect();
        expected.push(("timeout".to_string(), "5s".to_string()));

        ensure!(pairs == expected, "query decoded to {pairs:?}, expected {expected:?}");
        Ok(())
    }

    /// An aborted transport refuses requests until it is reset.
    pub fn test_abort_refuses_until_reset(&self) -> Result<()> {
        self.transport.abort_in_flight();
        // Aborting twice is harmless
        self.transport.abort_in_flight();

        for _ in 0..2 {
            let mut sink = Vec::new();
            match self.transport.fetch(&self.url(), &[], &mut sink) {
                Err(TransportError::Aborted) => {}
                other => return Err(anyhow!("expected Aborted, got {other:?}")),
            }
            ensure!(sink.is_empty(), "refused request wrote {} bytes", sink.len());
        }

        self.transport.reset_after_abort();
        let mut sink = Vec::new();
        if let Err(TransportError::Aborted) = self.transport.fetch(&self.url(), &[], &mut sink) {
            return Err(anyhow!("request refused after reset"));
        }
        Ok(())
    }

    /// Aborting a clone does not affect the original and vice versa.
    pub fn test_clone_has_own_abort_state(&self) -> Result<()> {
        self.transport.abort_in_flight();
        let clone = self.transport.box_clone();

        let mut sink = Vec::new();
        if let Err(TransportError::Aborted) = clone.fetch(&self.url(), &[], &mut sink) {
            return Err(anyhow!("clone inherited the abort flag"));
        }

        self.transport.reset_after_abort();
        clone.abort_in_flight();
        let mut sink = Vec::new();
        if let Err(TransportError::Aborted) = self.transport.fetch(&self.url(), &[], &mut sink) {
            return Err(anyhow!("aborting the clone aborted the original"));
        }
        Ok(())
    }
}
