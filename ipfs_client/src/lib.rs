//! Blocking client for the IPFS daemon HTTP API.
//!
//! [`Client`] exposes one method per daemon endpoint, grouped by family
//! under [`api`]. Requests go through an [`ipfs_core::Transport`]; by
//! default that is the networked [`ipfs_transport_http::HttpTransport`].
//!
//! ```no_run
//! use ipfs_client::{Client, ClientConfig};
//!
//! let client = Client::new(&ClientConfig::default());
//! let version = client.version()?;
//! println!("daemon version: {}", version["Version"]);
//! # Ok::<(), ipfs_client::Error>(())
//! ```

pub mod api;
pub mod client;
pub mod config;

pub use api::files::AddedFile;
pub use api::pin::PinRmMode;
pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use ipfs_core::{EndpointRequest, Error, FileSource, FileUpload, Result, TransportError};
