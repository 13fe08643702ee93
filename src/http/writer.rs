use chrono::{DateTime, Local, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, StatusCode};
use crate::server::context::ServerContext;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Formats `now` as an HTTP date, e.g. `Sat, 17 Oct 2026 09:12:01 GMT`.
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// The console line recorded for a handled request.
pub fn access_log_line(now: DateTime<Local>, request_line: &str, status: StatusCode) -> String {
    format!(
        "[{}] '{}' {} {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        request_line,
        status.as_u16(),
        status.reason_phrase()
    )
}

/// Serializes the status line, the fixed header block and the body.
///
/// Headers always appear in the same order. Content-Type and
/// Content-Encoding are written with an empty value when the client sent
/// nothing to echo; Content-Length is 0 for bodiless responses.
pub fn serialize_response(resp: &Response, ctx: &ServerContext, date: DateTime<Utc>) -> Vec<u8> {
    let head = format!(
        "{version} {code} {reason}\r\n\
         Connection: Keep-Alive\r\n\
         Date: {date}\r\n\
         Server: {server}\r\n\
         Etag: \"{etag}\"\r\n\
         Content-Encoding: {encoding}\r\n\
         Content-Length: {length}\r\n\
         Content-Type: {content_type}\r\n\
         \r\n",
        version = HTTP_VERSION,
        code = resp.status.as_u16(),
        reason = resp.status.reason_phrase(),
        date = http_date(date),
        server = ctx.config.server_name,
        etag = ctx.identity,
        encoding = resp.content_encoding.as_deref().unwrap_or_default(),
        length = resp.content_length(),
        content_type = resp.content_type.as_deref().unwrap_or_default(),
    );

    let mut buf = Vec::with_capacity(head.len() + resp.content_length());
    buf.extend_from_slice(head.as_bytes());
    if let Some(body) = &resp.body {
        buf.extend_from_slice(body);
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    /// Prepares `response` for sending.
    ///
    /// When `request_line` is non-empty the exchange is recorded in the
    /// access log first.
    pub fn new(response: &Response, ctx: &ServerContext, request_line: Option<&str>) -> Self {
        if let Some(line) = request_line.filter(|l| !l.is_empty()) {
            tracing::info!("{}", access_log_line(Local::now(), line, response.status));
        }

        Self {
            buffer: serialize_response(response, ctx, Utc::now()),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
