//! Aborting a blocked call from another thread.
//!
//! Starts a download that cannot complete (the CID does not exist, so the
//! daemon keeps searching), aborts it from the main thread, then resets the
//! session and makes a normal call.
//!
//! Needs a daemon on localhost:5001:
//!
//! ```text
//! RUST_LOG=debug cargo run -p ipfs_client --example threading
//! ```

use std::thread;
use std::time::Duration;

use anyhow::Result;
use ipfs_client::{Client, ClientConfig};
use tracing_subscriber::EnvFilter;

const MISSING: &str = "QmZTR5bcpQD7cFgTorqxZDYaew1Wqgfbd2ud9QqGPAkK2V";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::new(&ClientConfig::default());

    thread::scope(|s| {
        let download = s.spawn(|| {
            let mut sink = Vec::new();
            client.files_get(&format!("/ipfs/{MISSING}"), &mut sink)
        });

        thread::sleep(Duration::from_secs(1));
        tracing::info!("aborting download");
        client.abort();

        match download.join() {
            Ok(Err(err)) if err.is_aborted() => tracing::info!("download aborted"),
            Ok(other) => tracing::warn!(?other, "download was not aborted"),
            Err(_) => tracing::error!("download thread panicked"),
        }
    });

    client.reset();
    let version = client.version()?;
    tracing::info!(version = %version["Version"], "session usable again");
    Ok(())
}
