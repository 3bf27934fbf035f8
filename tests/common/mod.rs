//! Shared fixtures for the integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pathmap::http::connection::Connection;
use pathmap::http::handler::FileHandler;
use pathmap::routes::Resolver;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A scratch site: a temp directory holding a descriptor and its files.
pub struct Site {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Site {
    /// The two-route site used throughout: `/` → a.html ("hi"),
    /// `x.css` → x.css.
    pub fn standard() -> Self {
        let site = Self::empty();
        site.write_descriptor(r#"{"/": ["text/html", "a.html"], "x.css": ["text/css", "x.css"]}"#);
        site.write_file("a.html", b"hi");
        site.write_file("x.css", b"body { color: red; }\n");
        site
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.dir.path().join("routes.json")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_descriptor(&self, json: &str) {
        std::fs::write(self.descriptor_path(), json).unwrap();
    }

    pub fn write_file(&self, name: &str, content: &[u8]) {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn remove_file(&self, name: &str) {
        std::fs::remove_file(self.path(name)).unwrap();
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.descriptor_path())
    }

    pub fn handler(&self) -> Arc<FileHandler> {
        Arc::new(FileHandler::new(self.resolver()))
    }
}

/// Sends `input` over an in-memory connection, closes the client's write
/// half and returns everything the server wrote back.
#[allow(dead_code)]
pub async fn exchange(handler: Arc<FileHandler>, input: &[u8]) -> (Vec<u8>, anyhow::Result<()>) {
    let (mut client, server) = tokio::io::duplex(64 * 1024);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, handler);
        conn.run().await
    });

    // The server may hang up before reading everything
    let _ = client.write_all(input).await;
    let _ = client.shutdown().await;

    let mut output = Vec::new();
    client.read_to_end(&mut output).await.unwrap();

    (output, task.await.unwrap())
}

/// Splits a single response into its head (without the blank line) and body.
#[allow(dead_code)]
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(raw[..end].to_vec()).unwrap();
    (head, raw[end + 4..].to_vec())
}
