use bytes::Bytes;
use tokio::fs::File;

/// Body text sent with every 404.
pub const NOT_FOUND_BODY: &[u8] = b"HTTP 404: Not Found\r\n";

/// Body text sent with every 500.
pub const INTERNAL_ERROR_BODY: &[u8] = b"HTTP 500: Internal Server Error\r\n";

/// HTTP status codes the server produces.
///
/// - `Ok` (200): Resource found and streamed
/// - `NotFound` (404): Unknown or invalid path
/// - `InternalServerError` (500): Route exists but its file is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use pathmap::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Where the response body comes from.
#[derive(Debug)]
pub enum Body {
    /// No body bytes follow the headers
    Empty,
    /// A small body held in memory
    Full(Bytes),
    /// An open file streamed in chunks; `len` is the declared length
    File { file: File, len: u64 },
}

impl Body {
    pub fn len(&self) -> u64 {
        match self {
            Body::Empty => 0,
            Body::Full(bytes) => bytes.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A response ready to be written to the client.
///
/// Headers keep insertion order so identical requests produce identical
/// bytes on the wire.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they are sent
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use pathmap::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// assert_eq!(response.header("Content-Length"), Some("2"));
/// assert_eq!(response.header("Cache-Control"), Some("no-store"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Adds a header, replacing any earlier one with the same name.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, key.into(), value.into());
        self
    }

    /// Sets an in-memory body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Body::Full(body.into());
        self
    }

    /// Streams the body from `file`, declaring `len` bytes.
    pub fn file(mut self, file: File, len: u64) -> Self {
        self.body = Body::File { file, len };
        self
    }

    /// Builds the final Response.
    ///
    /// Adds `Content-Length` from the body when not already present, then
    /// `Cache-Control: no-store`, which every response carries.
    pub fn build(mut self) -> Response {
        if find_header(&self.headers, "Content-Length").is_none() {
            let len = self.body.len().to_string();
            self.headers.push(("Content-Length".to_string(), len));
        }

        set_header(
            &mut self.headers,
            "Cache-Control".to_string(),
            "no-store".to_string(),
        );

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A 200 response streaming `len` bytes of `file`.
    pub fn file(content_type: impl Into<String>, file: File, len: u64) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .file(file, len)
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Content-Type", "text/plain")
            .body(Bytes::from_static(NOT_FOUND_BODY))
            .build()
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError)
            .header("Content-Type", "text/plain")
            .body(Bytes::from_static(INTERNAL_ERROR_BODY))
            .build()
    }

    /// Drops the body while keeping every header, for answering `HEAD`.
    pub fn into_head(mut self) -> Self {
        self.body = Body::Empty;
        self
    }

    /// Looks up a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        find_header(&self.headers, key)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], key: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

fn set_header(headers: &mut Vec<(String, String)>, key: String, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
        Some(slot) => slot.1 = value,
        None => headers.push((key, value)),
    }
}
