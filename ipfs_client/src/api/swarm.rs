use ipfs_core::{EndpointRequest, Result};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Known addresses, keyed by peer.
    pub fn swarm_addrs(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("swarm/addrs"), &[])
    }

    /// Opens a connection to `peer`, a multiaddr ending in `/p2p/<id>`.
    pub fn swarm_connect(&self, peer: &str) -> Result<()> {
        self.fetch_json(EndpointRequest::new("swarm/connect").arg(peer), &[])?;
        Ok(())
    }

    pub fn swarm_disconnect(&self, peer: &str) -> Result<()> {
        self.fetch_json(EndpointRequest::new("swarm/disconnect").arg(peer), &[])?;
        Ok(())
    }

    /// Peers with an open connection.
    pub fn swarm_peers(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("swarm/peers"), &[])
    }
}
