use std::io::Write;

use ipfs_core::{EndpointRequest, FileUpload, Result};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Writes the raw bytes of block `block_id` into `sink`.
    pub fn block_get(&self, block_id: &str, sink: &mut dyn Write) -> Result<()> {
        self.fetch_to_sink(EndpointRequest::new("block/get").arg(block_id), sink)
    }

    /// Stores one block and returns its `{"Key", "Size"}` stat.
    pub fn block_put(&self, block: &FileUpload) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("block/put"), std::slice::from_ref(block))
    }

    pub fn block_stat(&self, block_id: &str) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("block/stat").arg(block_id), &[])
    }
}
