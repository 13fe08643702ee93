use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// Only GET is served. Everything else is answered with
/// 405 Method Not Allowed, including tokens that are not methods at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token, kept verbatim
    Other(String),
}

/// A parsed request head.
///
/// Built once per connection from the bytes the client sent. The request
/// body, if any, is never read.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target (e.g. "/index.html"), empty if the client sent none
    pub path: String,
    /// Last token of the request line (typically "HTTP/1.1")
    pub version: String,
    /// Request headers; a repeated name keeps its last value
    pub headers: HashMap<String, String>,
    /// The first line of the request with surrounding whitespace trimmed
    pub request_line: String,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Parses an HTTP method from a request line token.
    ///
    /// Matching is case-sensitive: `get` is not GET.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
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
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Builds the request, synthesizing the request line from its parts.
    pub fn build(self) -> Result<Request, &'static str> {
        let method = self.method.ok_or("method missing")?;
        let path = self.path.ok_or("path missing")?;
        let version = self.version.unwrap_or_else(|| "HTTP/1.1".to_string());
        let request_line = format!("{} {} {}", method, path, version);

        Ok(Request {
            method,
            path,
            version,
            headers: self.headers,
            request_line,
        })
    }
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// An exact match wins; otherwise the first ASCII case-insensitive match
    /// is returned.
    pub fn header(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.headers.get(key) {
            return Some(value.as_str());
        }
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// The `Accept` header, echoed back as the response Content-Type.
    pub fn accept(&self) -> Option<&str> {
        self.header("Accept")
    }

    /// The `Accept-Encoding` header, echoed back as the response Content-Encoding.
    pub fn accept_encoding(&self) -> Option<&str> {
        self.header("Accept-Encoding")
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}
