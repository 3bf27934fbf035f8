use std::fmt;

/// The key the descriptor uses for the server root.
pub const ROOT: &str = "/";

/// Reasons a request path is refused before the descriptor is consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path does not start with '/'")]
    MissingLeadingSlash,
    #[error("path contains an empty segment")]
    EmptySegment,
    #[error("path has a leading, trailing or doubled '.' in a segment")]
    MisplacedDot,
    #[error("path contains illegal character {0:?}")]
    IllegalCharacter(char),
}

/// A validated, lowercased lookup key derived from a request path.
///
/// The root path maps to the literal key `/`. Every other key is the request
/// path without its leading slash, so `/Docs/Index.html` becomes
/// `docs/index.html`. A trailing slash is kept as part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    /// Validates a raw request URI and normalizes it.
    ///
    /// The rules only allow ASCII letters, digits, `_`, `-`, `.` and `/`,
    /// forbid empty segments, and forbid any segment that starts or ends
    /// with a dot. That rules out `..` traversal and hidden files without
    /// having to split the path into components.
    ///
    /// # Example
    ///
    /// ```
    /// # use pathmap::routes::key::RouteKey;
    /// assert_eq!(RouteKey::parse("/About.HTML").unwrap().as_str(), "about.html");
    /// assert!(RouteKey::parse("/../etc/passwd").is_err());
    /// ```
    pub fn parse(uri: &str) -> Result<Self, PathError> {
        let rest = uri
            .strip_prefix('/')
            .ok_or(PathError::MissingLeadingSlash)?;

        if rest.is_empty() {
            return Ok(RouteKey(ROOT.to_string()));
        }

        if rest.starts_with('/') || rest.contains("//") {
            return Err(PathError::EmptySegment);
        }

        if rest.starts_with('.')
            || rest.ends_with('.')
            || rest.contains("/.")
            || rest.contains("./")
            || rest.contains("..")
        {
            return Err(PathError::MisplacedDot);
        }

        if let Some(c) = rest.chars().find(|c| !is_route_char(*c)) {
            return Err(PathError::IllegalCharacter(c));
        }

        Ok(RouteKey(rest.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_route_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}
