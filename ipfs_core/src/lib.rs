//! Core types and traits for talking to an IPFS daemon's HTTP API.
//!
//! This crate defines what every client and transport crate in the
//! workspace shares:
//!
//! - Request construction (`request::EndpointRequest`): endpoint path,
//!   ordered query parameters and the fixed default flags the daemon expects
//! - The `Transport` abstraction that performs the HTTP exchange, together
//!   with the multipart file parts it uploads (`FileUpload`)
//! - Cross-thread cancellation (`AbortSignal`)
//! - Response decoding for single JSON documents and newline-delimited JSON
//!   streams (`decode`)
//! - The error taxonomy shared by all operations (`Error`, `TransportError`)
//!
//! Concrete transports live in their own crates (`ipfs_transport_http`,
//! `ipfs_transport_memory`); the typed endpoint facade lives in
//! `ipfs_client`.

pub mod abort;
pub mod decode;
pub mod error;
pub mod request;
pub mod transport;

// Test utilities (behind feature flag)
#[cfg(feature = "testutil")]
pub mod testutil;

pub use abort::AbortSignal;
pub use decode::{decode_json, decode_lines, require_as, require_field};
pub use error::{Error, Result};
pub use request::EndpointRequest;
pub use transport::{FileSource, FileUpload, Transport, TransportError, url_encode};
