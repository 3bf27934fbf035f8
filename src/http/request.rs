use std::collections::HashMap;

/// HTTP request methods the server answers.
///
/// Only whole-resource retrieval is served. Anything else is refused at
/// parse time and the connection is dropped without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

/// A parsed request header block.
///
/// Header names are stored lowercased; use [`Request::header`] for lookups.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request target exactly as sent (e.g., "/index.html")
    pub path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers keyed by lowercased name
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Method names are case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use pathmap::http::request::Method;
    /// assert_eq!(Method::from_str("HEAD"), Some(Method::HEAD));
    /// assert_eq!(Method::from_str("POST"), None);
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the response to this request carries a body.
    pub fn wants_body(&self) -> bool {
        self.method == Method::GET
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// The connection stays open unless the client sent `Connection: close`.
    pub fn keep_alive(&self) -> bool {
        !self
            .header("Connection")
            .map(|v| v.eq_ignore_ascii_case("close"))
            .unwrap_or(false)
    }
}
