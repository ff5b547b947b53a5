use ipfs_core::{EndpointRequest, Result, require_as};
use serde_json::{Map, Value};

use crate::Client;

impl Client {
    /// Publishes `path` under the IPNS name of `key` and returns the name.
    ///
    /// Every entry of `options` is sent as one more query parameter, after
    /// `arg` and `key`, in map order. String values are sent as-is; other
    /// values as their JSON text, so `{"lifetime": "2h", "allow-offline": true}`
    /// becomes `&lifetime=2h&allow-offline=true`.
    pub fn name_publish(&self, path: &str, key: &str, options: &Map<String, Value>) -> Result<String> {
        let mut request = EndpointRequest::new("name/publish").arg(path).param("key", key);
        for (name, value) in options {
            request = match value {
                Value::String(s) => request.param(name.as_str(), s.as_str()),
                other => request.param(name.as_str(), other.to_string()),
            };
        }

        let reply = self.fetch_json(request, &[])?;
        require_as(&reply, "Name", None)
    }

    /// Resolves an IPNS name to the path it points to.
    pub fn name_resolve(&self, name: &str) -> Result<String> {
        let reply = self.fetch_json(EndpointRequest::new("name/resolve").arg(name), &[])?;
        require_as(&reply, "Path", None)
    }
}
