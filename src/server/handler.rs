//! Request dispatch.
//!
//! Turns a parsed [`Request`] into a [`Response`] without touching the
//! socket, so the protocol rules can be tested on their own.

use crate::content::Resolution;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::server::context::ServerContext;

/// Builds the response for `request`.
///
/// Also returns the request line to record in the access log, if this
/// outcome is logged. Rejected methods are not.
pub async fn handle<'a>(request: &'a Request, ctx: &ServerContext) -> (Response, Option<&'a str>) {
    if !request.is_get() {
        tracing::debug!(method = %request.method, "Method not allowed");
        return (echo(request, StatusCode::MethodNotAllowed, None), None);
    }

    let logged = Some(request.request_line.as_str());

    if request.path.is_empty() {
        return (echo(request, StatusCode::BadRequest, None), logged);
    }

    let response = match ctx.resolver.resolve(&request.path).await {
        Ok(Resolution::Found(body)) => echo(request, StatusCode::Ok, Some(body)),
        Ok(Resolution::NotFound) => echo(request, StatusCode::NotFound, None),
        Ok(Resolution::Forbidden) => echo(request, StatusCode::Forbidden, None),
        Err(e) => {
            tracing::error!(path = %request.path, error = %e, "Failed to load content");
            echo(request, StatusCode::InternalServerError, None)
        }
    };

    (response, logged)
}

/// A response that mirrors the client's Accept headers.
fn echo(request: &Request, status: StatusCode, body: Option<Vec<u8>>) -> Response {
    let builder = ResponseBuilder::new(status)
        .content_type(request.accept())
        .content_encoding(request.accept_encoding());

    let builder = match body {
        Some(body) => builder.body(body),
        None => builder,
    };
    builder.build()
}
