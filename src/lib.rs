//! Lantern - a small static file server
//!
//! Serves files from a web root over HTTP/1.1, one request per connection.

pub mod config;
pub mod content;
pub mod http;
pub mod server;
