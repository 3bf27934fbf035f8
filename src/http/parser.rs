use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Largest header block accepted before the connection is dropped.
pub const MAX_HEADER_BLOCK: usize = 8 * 1024;

/// Largest request body that is read and discarded.
pub const MAX_DISCARDED_BODY: usize = 64 * 1024;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed request line")]
    InvalidRequest,
    #[error("unsupported method")]
    InvalidMethod,
    #[error("malformed header line")]
    InvalidHeader,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    #[error("header block too large")]
    HeaderTooLarge,
    #[error("incomplete header block")]
    Incomplete,
}

/// Parses one header block from the front of `buf`.
///
/// On success returns the request and the number of bytes it occupied,
/// including any body announced by `Content-Length`. The body itself is
/// dropped since no supported method uses it. Empty lines in front of the
/// request line are skipped and counted as consumed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let skipped = leading_empty_lines(buf);
    if skipped > MAX_HEADER_BLOCK {
        return Err(ParseError::HeaderTooLarge);
    }
    let buf = &buf[skipped..];

    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) if end <= MAX_HEADER_BLOCK => end,
        Some(_) => return Err(ParseError::HeaderTooLarge),
        None if buf.len() > MAX_HEADER_BLOCK => return Err(ParseError::HeaderTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split(' ');

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    if parts.next().is_some() || path.is_empty() || !version.starts_with("HTTP/1.") {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidHeader);
        }

        headers.insert(key.to_ascii_lowercase(), value.trim().to_string());
    }

    // Body, skipped
    let content_length = headers
        .get("content-length")
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength)
        })
        .transpose()?
        .unwrap_or(0);

    if content_length > MAX_DISCARDED_BODY {
        return Err(ParseError::InvalidContentLength);
    }

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
    };

    let total_consumed = skipped + headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

fn leading_empty_lines(buf: &[u8]) -> usize {
    buf.chunks_exact(2).take_while(|pair| *pair == b"\r\n").count() * 2
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
