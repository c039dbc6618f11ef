//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;

use webify::observability::MemorySink;
use webify::{HttpServer, ServerConfig, Shutdown};

pub const INDEX_HTML: &str = "<html><body><script src=\"app.js\"></script></body></html>";
pub const APP_JS: &str = "console.log('hi');";

/// A directory with an index page, a script and a nested folder.
pub fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.html", INDEX_HTML);
    write(dir.path(), "app.js", APP_JS);
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    write(&dir.path().join("docs"), "index.html", "<h1>docs</h1>");
    dir
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// Config serving `root`, everything else default.
#[allow(dead_code)]
pub fn serving(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        root: root.to_path_buf(),
        ..Default::default()
    }
}

/// Start a server on an ephemeral loopback port.
#[allow(dead_code)]
pub async fn start_server(config: ServerConfig, sink: MemorySink) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, Arc::new(sink)).unwrap();
    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, signalled).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that neither pools connections nor follows redirects.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
