//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 to serve static files: one request per connection,
//! GET only, no request bodies.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving read, dispatch and write
//! - **`parser`**: Turns raw request bytes into a request line and header map
//! - **`request`**: Parsed request representation
//! - **`response`**: Status codes and the response model with a builder
//! - **`writer`**: Serializes responses and records the access log line
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read until the blank line ending the head
//!        └──────┬──────┘
//!               │ Request received (or 431 if too large)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Check method, resolve the file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! `Connection: Keep-Alive` is advertised on every response, but the
//! connection is always closed after one exchange.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
