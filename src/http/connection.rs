use std::sync::Arc;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::parser::{ParseError, find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::context::ServerContext;
use crate::server::handler;

const READ_CHUNK: usize = 1024;

/// One client connection, serving exactly one request.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    ctx: Arc<ServerContext>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What the reader got from the client.
enum Inbound {
    Request(Request),
    TooLarge,
    Nothing,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<ServerContext>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            ctx,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let inbound = tokio::time::timeout(self.ctx.config.read_timeout(), self.read_request())
                        .await
                        .context("timed out reading request")??;

                    self.state = match inbound {
                        Inbound::Request(req) => ConnectionState::Processing(req),
                        Inbound::TooLarge => {
                            tracing::warn!(
                                limit = self.ctx.config.max_request_bytes,
                                "Request head too large"
                            );
                            let response = Response::empty(StatusCode::RequestHeaderFieldsTooLarge);
                            ConnectionState::Writing(ResponseWriter::new(&response, &self.ctx, None))
                        }
                        Inbound::Nothing => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let (response, logged) = handler::handle(&req, &self.ctx).await;

                    let writer = ResponseWriter::new(&response, &self.ctx, logged);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One request per connection, whatever the client asked for.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the end of the request head, the peer closing its side,
    /// or the size limit.
    async fn read_request(&mut self) -> anyhow::Result<Inbound> {
        let limit = self.ctx.config.max_request_bytes;

        loop {
            if let Some(end) = find_headers_end(&self.buffer) {
                if end > limit {
                    return Ok(Inbound::TooLarge);
                }
                return Ok(Self::parse(&self.buffer[..end]));
            }

            if self.buffer.len() > limit {
                return Ok(Inbound::TooLarge);
            }

            let mut temp = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // Client stopped sending; serve whatever arrived.
                return Ok(Self::parse(&self.buffer));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    fn parse(buf: &[u8]) -> Inbound {
        match parse_http_request(buf) {
            Ok(request) => Inbound::Request(request),
            Err(ParseError::Empty) => Inbound::Nothing,
        }
    }
}
