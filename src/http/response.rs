/// HTTP status codes the server answers with.
///
/// - `Ok` (200): file found and served
/// - `BadRequest` (400): GET without a request target
/// - `Forbidden` (403): path escapes the web root
/// - `NotFound` (404): no such file
/// - `MethodNotAllowed` (405): anything but GET
/// - `RequestHeaderFieldsTooLarge` (431): request head over the size limit
/// - `InternalServerError` (500): file exists but could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Page Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 431 Request Header Fields Too Large
    RequestHeaderFieldsTooLarge,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::RequestHeaderFieldsTooLarge => 431,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the reason phrase sent on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Page Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Page Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A response ready to be serialized.
///
/// Content-Type and Content-Encoding are not derived from the file; they
/// echo the client's `Accept` and `Accept-Encoding` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use lantern::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type(Some("text/html"))
///     .body(b"<h1>hi</h1>".to_vec())
///     .build();
/// assert_eq!(response.content_length(), 11);
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<String>,
    content_encoding: Option<String>,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_encoding: None,
            body: None,
        }
    }

    pub fn content_type(mut self, value: Option<&str>) -> Self {
        self.content_type = value.map(str::to_string);
        self
    }

    pub fn content_encoding(mut self, value: Option<&str>) -> Self {
        self.content_encoding = value.map(str::to_string);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            content_encoding: self.content_encoding,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body.into()).build()
    }

    /// A bodiless response with the given status.
    pub fn empty(status: StatusCode) -> Self {
        ResponseBuilder::new(status).build()
    }

    pub fn not_found() -> Self {
        Self::empty(StatusCode::NotFound)
    }

    pub fn method_not_allowed() -> Self {
        Self::empty(StatusCode::MethodNotAllowed)
    }

    /// Length of the body in bytes, 0 when there is none.
    pub fn content_length(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}
