use crate::http::request::{Method, Request};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace was received.
    Empty,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => f.write_str("empty request"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits a request head into its first line and a header map.
///
/// Accepts both `\n` and `\r\n` line endings. Header lines are read up to the
/// first blank line; lines without a colon are skipped and a repeated name
/// keeps its last value.
pub fn parse_headers(text: &str) -> (String, HashMap<String, String>) {
    let mut lines = text.lines();
    let first_line = lines.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    for line in lines {
        if line.trim().is_empty() {
            break;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    (first_line, headers)
}

/// Parses raw request bytes into a [`Request`].
///
/// Invalid UTF-8 is replaced rather than rejected. A request line that lacks
/// a target or version yields empty strings for them; the caller decides what
/// that means for the method at hand.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let (first_line, headers) = parse_headers(&text);
    let request_line = first_line.trim().to_string();

    let tokens: Vec<&str> = request_line.split_whitespace().collect();
    let method = Method::parse(tokens.first().copied().unwrap_or_default());
    let path = tokens.get(1).copied().unwrap_or_default().to_string();
    let version = if tokens.len() > 2 {
        tokens.last().copied().unwrap_or_default().to_string()
    } else {
        String::new()
    };

    Ok(Request {
        method,
        path,
        version,
        headers,
        request_line,
    })
}

/// Returns the offset just past the blank line ending the request head.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4);
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|i| i + 2);

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
