use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use ipfs_client::{Client, ClientConfig, Error};
use ipfs_core::Transport;
use ipfs_transport_memory::{MemoryDaemon, MemoryTransport};
use serde_json::json;

fn setup() -> (Arc<MemoryDaemon>, Client) {
    let daemon = Arc::new(MemoryDaemon::new());
    let client = Client::with_transport(&ClientConfig::default(), MemoryTransport::new(daemon.clone()));
    (daemon, client)
}

#[test]
fn abort_from_other_thread_then_reset() -> Result<()> {
    let (daemon, client) = setup();
    daemon.hang("cat");
    daemon.reply_json("version", &json!({"Version": "0.30.0"}));

    thread::scope(|s| {
        let call = s.spawn(|| {
            let started = Instant::now();
            let mut sink = Vec::new();
            let result = client.files_get("/ipfs/QmSlow", &mut sink);
            (result, sink, started.elapsed())
        });

        thread::sleep(Duration::from_millis(100));
        client.abort();

        let (result, sink, elapsed) = call.join().expect("call thread panicked");
        assert!(result.as_ref().is_err_and(Error::is_aborted), "got {result:?}");
        assert!(sink.is_empty());
        assert!(elapsed < Duration::from_secs(5));
    });

    // Refused until reset
    assert!(client.version().is_err_and(|e| e.is_aborted()));

    client.reset();
    assert_eq!(client.version()?["Version"], "0.30.0");
    Ok(())
}

#[test]
fn abort_and_reset_are_idempotent() -> Result<()> {
    let (daemon, client) = setup();
    daemon.reply_json("id", &json!({"ID": "12D3KooWPeer"}));

    client.reset();
    client.abort();
    client.abort();
    assert!(client.id().is_err_and(|e| e.is_aborted()));
    client.reset();
    client.reset();
    client.id()?;
    Ok(())
}

#[test]
fn clones_abort_independently() -> Result<()> {
    let (daemon, client) = setup();
    daemon.reply_json("id", &json!({"ID": "12D3KooWPeer"}));

    let clone = client.clone();
    assert_eq!(clone.url_prefix(), client.url_prefix());

    client.abort();
    assert!(client.id().is_err_and(|e| e.is_aborted()));
    clone.id()?;

    client.reset();
    clone.abort();
    client.id()?;
    assert!(clone.id().is_err_and(|e| e.is_aborted()));

    // Both sessions still reach the same daemon
    assert_eq!(daemon.requests().len(), 2);
    Ok(())
}

#[test]
fn session_from_boxed_transport() -> Result<()> {
    let daemon = Arc::new(MemoryDaemon::new());
    daemon.reply_json("id", &json!({"ID": "12D3KooWPeer"}));
    let original = MemoryTransport::new(daemon.clone());

    let client = Client::with_boxed_transport(&ClientConfig::default(), original.box_clone());
    original.abort_in_flight();
    assert_eq!(client.id()?["ID"], "12D3KooWPeer");

    client.abort();
    assert!(client.id().is_err_and(|e| e.is_aborted()));
    assert_eq!(daemon.requests().len(), 1);
    Ok(())
}

#[test]
fn concurrent_calls_on_clones() -> Result<()> {
    let (daemon, client) = setup();
    daemon.reply_json("version", &json!({"Version": "0.30.0"}));

    let results: Vec<_> = thread::scope(|s| {
        let calls: Vec<_> = (0..4)
            .map(|_| {
                let session = client.clone();
                s.spawn(move || session.version())
            })
            .collect();
        calls.into_iter().map(|call| call.join().expect("call thread panicked")).collect()
    });

    for result in results {
        assert_eq!(result?["Version"], "0.30.0");
    }
    assert_eq!(daemon.requests().len(), 4);
    Ok(())
}
