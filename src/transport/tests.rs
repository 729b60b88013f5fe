use super::*;
use std::sync::atomic::{AtomicU64, Ordering};

#[tokio::test]
async fn test_canned_replies() {
    let transport = CannedTransport::new()
        .with_body("http://a/query?x=1", "<quakeml/>")
        .with_reply("http://a/query?x=2", 204, Vec::new());

    let seen = AtomicU64::new(0);
    let progress = |received: u64, _total: Option<u64>| {
        seen.store(received, Ordering::SeqCst);
    };

    let reply = transport.get("http://a/query?x=1", &progress).await.unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.body, b"<quakeml/>");
    assert_eq!(seen.load(Ordering::SeqCst), 10);

    let reply = transport.get("http://a/query?x=2", &progress).await.unwrap();
    assert_eq!(reply.status, 204);
    assert!(reply.body.is_empty());

    let err = transport.get("http://a/other", &progress).await.unwrap_err();
    assert!(matches!(err, TransportError::Unavailable(url) if url == "http://a/other"));

    assert_eq!(
        transport.requests(),
        vec!["http://a/query?x=1", "http://a/query?x=2", "http://a/other"]
    );
}

#[test]
fn test_reply_status() {
    assert!(Reply::new("u", 200, "").is_success());
    assert!(Reply::new("u", 204, "").is_success());
    assert!(!Reply::new("u", 404, "").is_success());
    assert!(!Reply::new("u", 500, "").is_success());
}

#[test]
fn test_http_transport_builds() {
    assert!(HttpTransport::new().is_ok());
}

#[test]
fn test_initial_capacity_is_bounded() {
    use super::http::initial_capacity;
    assert_eq!(initial_capacity(None), 0);
    assert_eq!(initial_capacity(Some(4096)), 4096);
    assert_eq!(initial_capacity(Some(u64::MAX)), 1 << 24);
}
