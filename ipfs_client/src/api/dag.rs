use std::io::Write;

use ipfs_core::{EndpointRequest, FileUpload, Result, require_as, require_field};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Writes the DAG rooted at `cid` into `sink` as a CAR archive.
    pub fn dag_export(&self, cid: &str, sink: &mut dyn Write) -> Result<()> {
        let request = EndpointRequest::new("dag/export")
            .arg(cid)
            .flag("progress", false);
        self.fetch_to_sink(request, sink)
    }

    /// Imports a CAR archive and returns the CID of its root.
    pub fn dag_import(&self, car: &FileUpload, pin_roots: bool) -> Result<String> {
        let request = EndpointRequest::new("dag/import").flag("pin-roots", pin_roots);
        let reply = self.fetch_json(request, std::slice::from_ref(car))?;

        // {"Root": {"Cid": {"/": "bafy..."}, "PinErrorMsg": ""}}
        let root = require_field(&reply, "Root", None)?;
        let cid = require_field(root, "Cid", None)?;
        require_as(cid, "/", None)
    }

    /// Stores `node` as a DAG node and returns its CID.
    pub fn dag_put(&self, node: &Value, pin: bool) -> Result<String> {
        let request = EndpointRequest::new("dag/put").flag("pin", pin);
        let part = FileUpload::contents("file", node.to_string());
        let reply = self.fetch_json(request, &[part])?;

        let cid = require_field(&reply, "Cid", None)?;
        require_as(cid, "/", None)
    }

    pub fn dag_get(&self, path: &str) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("dag/get").arg(path), &[])
    }

    /// Resolves `path` to a CID and the remaining path below it.
    pub fn dag_resolve(&self, path: &str) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("dag/resolve").arg(path), &[])
    }

    pub fn dag_stat(&self, cid: &str) -> Result<Value> {
        let request = EndpointRequest::new("dag/stat")
            .arg(cid)
            .flag("progress", false);
        self.fetch_json(request, &[])
    }
}
