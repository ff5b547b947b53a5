use ipfs_core::{EndpointRequest, FileUpload, Result, require_field};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Returns the configuration value stored under `key`.
    ///
    /// An empty key returns the whole configuration document.
    pub fn config_get(&self, key: &str) -> Result<Value> {
        if key.is_empty() {
            return self.config_show();
        }

        let reply = self.fetch_json(EndpointRequest::new("config").arg(key), &[])?;
        // {"Key": "Datastore", "Value": {...}}
        Ok(require_field(&reply, "Value", None)?.clone())
    }

    pub fn config_show(&self) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("config/show"), &[])
    }

    /// Sets `key` to `value`.
    ///
    /// The value travels as JSON text; the default `json=true` flag makes the
    /// daemon parse it rather than store it as a string.
    pub fn config_set(&self, key: &str, value: &Value) -> Result<()> {
        let request = EndpointRequest::new("config").arg(key).arg(value.to_string());
        self.fetch_json(request, &[])?;
        Ok(())
    }

    /// Replaces the whole configuration with `config`.
    pub fn config_replace(&self, config: &Value) -> Result<()> {
        let part = FileUpload::contents("new_config.json", config.to_string());
        self.fetch_raw(EndpointRequest::new("config/replace"), &[part])?;
        Ok(())
    }
}
