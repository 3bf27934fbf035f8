use std::future::Future;
use std::io;
use std::path::Path;

use tokio::fs::{self, File};
use tracing::warn;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::routes::resolver::{ResolvedResource, Resolver};

/// Produces the response for one parsed request.
///
/// The connection loop is generic over this trait so the accept loop never
/// needs to know what is being served.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &Request) -> impl Future<Output = Response> + Send;
}

/// Serves files named by the routing descriptor.
#[derive(Debug, Clone)]
pub struct FileHandler {
    resolver: Resolver,
}

impl FileHandler {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

impl Handler for FileHandler {
    async fn handle(&self, request: &Request) -> Response {
        let response = match self.resolver.resolve(&request.path).await {
            ResolvedResource::NotFound => Response::not_found(),
            ResolvedResource::Found {
                content_type,
                file_path,
            } => match open_regular_file(&file_path).await {
                Ok((file, len)) => Response::file(content_type, file, len),
                Err(e) => {
                    warn!(
                        path = %request.path,
                        file = %file_path.display(),
                        error = %e,
                        "Routed file is unusable"
                    );
                    Response::internal_error()
                }
            },
        };

        if request.wants_body() {
            response
        } else {
            response.into_head()
        }
    }
}

/// Checks that `path` is a regular file right now and opens it.
///
/// The length comes from the metadata query, not from the open handle, and
/// is what the response declares.
async fn open_regular_file(path: &Path) -> io::Result<(File, u64)> {
    let metadata = fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(io::Error::other("not a regular file"));
    }

    let file = File::open(path).await?;
    Ok((file, metadata.len()))
}
