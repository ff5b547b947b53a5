use ipfs_core::{EndpointRequest, Error, Result, decode_lines, require_field};
use serde_json::Value;

use crate::Client;

impl Client {
    /// Looks up the addresses of `peer_id` in the DHT.
    ///
    /// The daemon streams query events, one per line; the first event
    /// whose `Responses` name the peer carries its `Addrs`. A stream that
    /// never names the peer fails with [`Error::NotFound`], carrying the
    /// whole reply.
    pub fn dht_find_peer(&self, peer_id: &str) -> Result<Value> {
        let body = self.fetch_raw(EndpointRequest::new("routing/findpeer").arg(peer_id), &[])?;

        for line in decode_lines(&body) {
            let (number, event) = line?;
            // Responses is null for intermediate query events
            let Some(responses) = event.get("Responses").and_then(Value::as_array) else {
                continue;
            };
            if let Some(peer) = responses
                .iter()
                .find(|response| response.get("ID").and_then(Value::as_str) == Some(peer_id))
            {
                return Ok(require_field(peer, "Addrs", Some(number))?.clone());
            }
        }

        Err(Error::NotFound {
            key: format!("peer {peer_id}"),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Returns every query event of a provider lookup for `cid`, in order.
    pub fn dht_find_provs(&self, cid: &str) -> Result<Value> {
        let body = self.fetch_raw(EndpointRequest::new("routing/findprovs").arg(cid), &[])?;
        let events = decode_lines(&body)
            .map(|line| line.map(|(_, event)| event))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(events))
    }
}
