use ipfs_core::{EndpointRequest, Result, require_as};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Generates a key named `name` and returns its ID.
    ///
    /// `key_type` is one of the daemon's key types, e.g. `"rsa"` or
    /// `"ed25519"`; `size` only matters for RSA keys.
    pub fn key_gen(&self, name: &str, key_type: &str, size: u32) -> Result<String> {
        let request = EndpointRequest::new("key/gen")
            .arg(name)
            .param("type", key_type)
            .param("size", size.to_string());
        let reply = self.fetch_json(request, &[])?;
        require_as(&reply, "Id", None)
    }

    /// Returns the keychain as an array of `{"Name", "Id"}` objects.
    pub fn key_list(&self) -> Result<Value> {
        let reply = self.fetch_json(EndpointRequest::new("key/list"), &[])?;
        require_as(&reply, "Keys", None)
    }

    pub fn key_rm(&self, name: &str) -> Result<()> {
        self.fetch_raw(EndpointRequest::new("key/rm").arg(name), &[])?;
        Ok(())
    }

    pub fn key_rename(&self, old_name: &str, new_name: &str) -> Result<()> {
        let request = EndpointRequest::new("key/rename").arg(old_name).arg(new_name);
        self.fetch_raw(request, &[])?;
        Ok(())
    }
}
