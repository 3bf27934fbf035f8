//! Routing descriptor loading.
//!
//! The descriptor is a JSON object mapping route keys to
//! `[content-type, file-path]` pairs:
//!
//! ```json
//! {
//!     "/": ["text/html", "index.html"],
//!     "style.css": ["text/css", "assets/style.css"]
//! }
//! ```
//!
//! Relative file paths are resolved against the directory holding the
//! descriptor, never against the process working directory.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncReadExt;

use crate::routes::key::RouteKey;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("descriptor {} is not a regular file", path.display())]
    NotAFile { path: PathBuf },

    #[error("failed to read descriptor {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("descriptor is not a JSON object of string arrays: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("route {key:?} has {len} elements, expected [content-type, file-path]")]
    Shape { key: String, len: usize },
}

/// One resolved route: what to send and where to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub content_type: String,
    pub file_path: PathBuf,
}

/// A parsed routing descriptor. Built per lookup and thrown away after.
#[derive(Debug, Clone, Default)]
pub struct RouteDescriptor {
    entries: HashMap<String, RouteEntry>,
}

impl RouteDescriptor {
    /// Reads and parses the descriptor at `path`.
    ///
    /// Any deviation from the expected shape rejects the whole file, so a
    /// single bad entry makes every route unavailable until it is fixed.
    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Check before opening: opening a FIFO blocks until a writer shows up
        let metadata = fs::metadata(path).await.map_err(io_err)?;
        if !metadata.is_file() {
            return Err(LoadError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let mut file = File::open(path).await.map_err(io_err)?;
        let mut text = String::with_capacity(metadata.len() as usize);
        file.read_to_string(&mut text).await.map_err(io_err)?;

        let base = path.parent().unwrap_or_else(|| Path::new("/"));
        Self::from_json(&text, base)
    }

    /// Parses descriptor text, resolving relative file paths against `base`.
    pub fn from_json(text: &str, base: &Path) -> Result<Self, LoadError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(text)?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let [content_type, file_path]: [String; 2] = value
                .try_into()
                .map_err(|v: Vec<String>| LoadError::Shape {
                    key: key.clone(),
                    len: v.len(),
                })?;

            entries.insert(
                key,
                RouteEntry {
                    content_type,
                    // join() keeps absolute paths as they are
                    file_path: base.join(file_path),
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &RouteKey) -> Option<&RouteEntry> {
        self.entries.get(key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
