use ipfs_core::{EndpointRequest, Result};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Identity of the daemon: peer ID, public key, addresses and versions.
    pub fn id(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("id"), &[])
    }

    pub fn version(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("version"), &[])
    }
}
