//! vidstream - stream-oriented file server core
//!
//! Turns per-stream transport events (open, read-ready, write-ready, close)
//! into file-serving responses. The transport engine is abstracted behind
//! [`transport::StreamTransport`]; [`server`] ships a TCP implementation for
//! local use.

pub mod config;
pub mod http;
pub mod resource;
pub mod server;
pub mod session;
pub mod transport;
