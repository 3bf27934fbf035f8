use std::path::{Path, PathBuf};

use tracing::debug;

use crate::routes::descriptor::RouteDescriptor;
use crate::routes::key::RouteKey;

/// Outcome of looking up a request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedResource {
    Found {
        content_type: String,
        file_path: PathBuf,
    },
    NotFound,
}

impl ResolvedResource {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedResource::Found { .. })
    }
}

/// Maps raw request URIs to files through the routing descriptor.
///
/// Holds only the descriptor location. Every call to [`Resolver::resolve`]
/// reads the descriptor again, so the answer always reflects what is on
/// disk right now.
#[derive(Debug, Clone)]
pub struct Resolver {
    descriptor_path: PathBuf,
}

impl Resolver {
    pub fn new(descriptor_path: impl Into<PathBuf>) -> Self {
        Self {
            descriptor_path: descriptor_path.into(),
        }
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Resolves `uri` against the current descriptor.
    ///
    /// Invalid paths, an unreadable or malformed descriptor and unknown keys
    /// all collapse into [`ResolvedResource::NotFound`].
    pub async fn resolve(&self, uri: &str) -> ResolvedResource {
        let key = match RouteKey::parse(uri) {
            Ok(key) => key,
            Err(e) => {
                debug!(uri, error = %e, "Rejected request path");
                return ResolvedResource::NotFound;
            }
        };

        let descriptor = match RouteDescriptor::load(&self.descriptor_path).await {
            Ok(d) => d,
            Err(e) => {
                debug!(
                    descriptor = %self.descriptor_path.display(),
                    error = %e,
                    "Routing descriptor unavailable"
                );
                return ResolvedResource::NotFound;
            }
        };

        match descriptor.get(&key) {
            Some(entry) => ResolvedResource::Found {
                content_type: entry.content_type.clone(),
                file_path: entry.file_path.clone(),
            },
            None => {
                debug!(key = %key, "No route for key");
                ResolvedResource::NotFound
            }
        }
    }
}
