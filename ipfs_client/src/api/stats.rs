use ipfs_core::{EndpointRequest, Result};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Bandwidth totals and rates.
    pub fn stats_bw(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("stats/bw"), &[])
    }

    /// Repository size, object count and limits.
    pub fn stats_repo(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("stats/repo"), &[])
    }
}
