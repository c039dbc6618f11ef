//! End-to-end tests over real TCP connections.

use webify::observability::MemorySink;
use webify::ServerConfig;

mod common;

#[tokio::test]
async fn serves_directory_over_tcp() {
    let site = common::site();
    let sink = MemorySink::new();
    let (addr, shutdown) = common::start_server(common::serving(site.path()), sink.clone()).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["cache-control"],
        "no-cache, no-store, no-transform, must-revalidate, private, max-age=0"
    );
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), common::INDEX_HTML);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, Some(200));

    shutdown.trigger();
}

#[tokio::test]
async fn echo_mode_over_tcp() {
    let sink = MemorySink::new();
    let config = ServerConfig {
        echo: true,
        log_body: true,
        cache: true,
        ..Default::default()
    };
    let (addr, shutdown) = common::start_server(config, sink.clone()).await;

    let res = common::client()
        .post(format!("http://{}/some/endpoint", addr))
        .body("hello world")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cache-control"], "max-age=31536000");
    assert_eq!(res.text().await.unwrap(), "hello world");

    let records = sink.records();
    assert_eq!(records[0].body.as_deref(), Some("hello world"));
    assert!(records[0].remote_addr.is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn debug_records_include_peer_address() {
    let site = common::site();
    let sink = MemorySink::new();
    let config = ServerConfig {
        debug: true,
        ..common::serving(site.path())
    };
    let (addr, shutdown) = common::start_server(config, sink.clone()).await;

    let res = common::client()
        .get(format!("http://{}/app.js", addr))
        .header("authorization", "Bearer token")
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);

    let record = &sink.records()[0];
    let peer = record.remote_addr.as_deref().unwrap();
    assert!(peer.starts_with("127.0.0.1:"));
    assert_eq!(record.protocol.as_deref(), Some("HTTP/1.1"));
    assert!(record
        .headers
        .iter()
        .any(|h| h.name == "authorization" && h.value == "[REDACTED]"));

    shutdown.trigger();
}

#[tokio::test]
async fn mount_redirect_over_tcp() {
    let site = common::site();
    let config = ServerConfig {
        mount: "/assets".into(),
        ..common::serving(site.path())
    };
    let (addr, shutdown) = common::start_server(config, MemorySink::new()).await;

    let res = common::client()
        .get(format!("http://{}/assets", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "/assets/");

    shutdown.trigger();
}
