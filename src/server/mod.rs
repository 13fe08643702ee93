//! Listener and per-request dispatch.

pub mod context;
pub mod handler;
pub mod listener;
