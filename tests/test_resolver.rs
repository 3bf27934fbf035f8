mod common;

use common::Site;
use pathmap::http::handler::Handler;
use pathmap::http::request::{Method, RequestBuilder};
use pathmap::http::response::{Body, StatusCode};
use pathmap::routes::ResolvedResource;

#[tokio::test]
async fn test_resolve_root() {
    let site = Site::standard();

    assert_eq!(
        site.resolver().resolve("/").await,
        ResolvedResource::Found {
            content_type: "text/html".to_string(),
            file_path: site.path("a.html"),
        }
    );
}

#[tokio::test]
async fn test_resolve_is_case_insensitive() {
    let site = Site::standard();
    let resolver = site.resolver();

    let lower = resolver.resolve("/x.css").await;
    let upper = resolver.resolve("/X.CSS").await;

    assert!(lower.is_found());
    assert_eq!(lower, upper);
}

#[test]
fn test_resolver_keeps_descriptor_path() {
    let site = Site::standard();

    assert_eq!(site.resolver().descriptor_path(), site.descriptor_path());
    assert_eq!(
        site.handler().resolver().descriptor_path(),
        site.descriptor_path()
    );
}

#[tokio::test]
async fn test_resolve_unknown_key() {
    let site = Site::standard();

    assert_eq!(
        site.resolver().resolve("/missing.html").await,
        ResolvedResource::NotFound
    );
}

#[tokio::test]
async fn test_resolve_invalid_path_never_reads_descriptor() {
    let site = Site::empty();
    // A descriptor that would match the raw string if it were looked up
    site.write_descriptor(r#"{"../a.html": ["text/html", "a.html"]}"#);

    assert_eq!(
        site.resolver().resolve("/../a.html").await,
        ResolvedResource::NotFound
    );
}

#[tokio::test]
async fn test_resolve_missing_descriptor() {
    let site = Site::empty();

    assert_eq!(site.resolver().resolve("/").await, ResolvedResource::NotFound);
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_fifo_descriptor_is_not_found() {
    let site = Site::empty();
    let status = std::process::Command::new("mkfifo")
        .arg(site.descriptor_path())
        .status()
        .unwrap();
    assert!(status.success());

    let resolved = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        site.resolver().resolve("/"),
    )
    .await;

    assert_eq!(resolved.ok(), Some(ResolvedResource::NotFound));
}

#[tokio::test]
async fn test_resolve_malformed_descriptor_hides_every_route() {
    let site = Site::empty();
    site.write_descriptor(r#"{"/": ["text/html", "a.html"], "bad": ["text/html"]}"#);
    site.write_file("a.html", b"hi");

    assert_eq!(site.resolver().resolve("/").await, ResolvedResource::NotFound);
}

#[tokio::test]
async fn test_resolve_follows_descriptor_edits() {
    let site = Site::standard();
    let resolver = site.resolver();

    assert!(resolver.resolve("/x.css").await.is_found());

    site.write_descriptor(r#"{"/": ["text/html", "a.html"]}"#);
    assert_eq!(resolver.resolve("/x.css").await, ResolvedResource::NotFound);
}

#[tokio::test]
async fn test_resolve_trailing_slash_key() {
    let site = Site::empty();
    site.write_descriptor(r#"{"docs/": ["text/html", "docs/index.html"]}"#);

    assert_eq!(
        site.resolver().resolve("/Docs/").await,
        ResolvedResource::Found {
            content_type: "text/html".to_string(),
            file_path: site.path("docs/index.html"),
        }
    );
    assert_eq!(site.resolver().resolve("/docs").await, ResolvedResource::NotFound);
}

#[tokio::test]
async fn test_handler_found() {
    let site = Site::standard();
    let request = RequestBuilder::new().method(Method::GET).path("/").build().unwrap();

    let response = site.handler().handle(&request).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("Content-Length"), Some("2"));
    assert_eq!(response.header("Cache-Control"), Some("no-store"));
    assert!(matches!(response.body, Body::File { len: 2, .. }));
}

#[tokio::test]
async fn test_handler_head_drops_body() {
    let site = Site::standard();
    let request = RequestBuilder::new().method(Method::HEAD).path("/").build().unwrap();

    let response = site.handler().handle(&request).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Length"), Some("2"));
    assert!(matches!(response.body, Body::Empty));
}

#[tokio::test]
async fn test_handler_deleted_file_is_500() {
    let site = Site::standard();
    site.remove_file("a.html");
    let request = RequestBuilder::new().method(Method::GET).path("/").build().unwrap();

    let response = site.handler().handle(&request).await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}

#[tokio::test]
async fn test_handler_directory_target_is_500() {
    let site = Site::empty();
    site.write_descriptor(r#"{"/": ["text/html", "."]}"#);
    let request = RequestBuilder::new().method(Method::GET).path("/").build().unwrap();

    let response = site.handler().handle(&request).await;

    assert_eq!(response.status, StatusCode::InternalServerError);
}
