use ipfs_core::{EndpointRequest, Error, Result, require_field};
use serde_json::Value;

use crate::Client;

/// How [`Client::pin_rm`] unpins an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinRmMode {
    /// Remove the pin and the pins it implied on descendants.
    #[default]
    Recursive,
    /// Remove a direct pin only.
    NonRecursive,
}

impl PinRmMode {
    fn is_recursive(self) -> bool {
        self == PinRmMode::Recursive
    }
}

impl Client {
    /// Pins `object_id` and checks that the daemon reports it as pinned.
    pub fn pin_add(&self, object_id: &str) -> Result<()> {
        let reply = self.fetch_json(EndpointRequest::new("pin/add").arg(object_id), &[])?;

        let pins = require_field(&reply, "Pins", None)?;
        let pinned = pins
            .as_array()
            .is_some_and(|pins| pins.iter().any(|pin| pin.as_str() == Some(object_id)));
        if !pinned {
            return Err(Error::VerificationFailed {
                subject: format!("pinning {object_id:?}"),
                response: reply.to_string(),
            });
        }
        Ok(())
    }

    /// Lists pinned objects, or only `object_id` when given.
    pub fn pin_ls(&self, object_id: Option<&str>) -> Result<Value> {
        let mut request = EndpointRequest::new("pin/ls");
        if let Some(id) = object_id {
            request = request.arg(id);
        }
        self.fetch_json(request, &[])
    }

    pub fn pin_rm(&self, object_id: &str, mode: PinRmMode) -> Result<()> {
        let request = EndpointRequest::new("pin/rm")
            .arg(object_id)
            .flag("recursive", mode.is_recursive());
        self.fetch_json(request, &[])?;
        Ok(())
    }
}
