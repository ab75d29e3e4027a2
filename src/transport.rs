//! The primitives a transport engine offers to a stream session.
//!
//! The engine owns connection and stream lifetime and delivers readiness
//! events; the session reacts by calling back into the engine through
//! [`StreamTransport`]. All calls are non-blocking.

use std::io;

use crate::resource::ResourceReader;

/// One response header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Which half of a stream to shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// Per-stream I/O offered by the engine.
pub trait StreamTransport {
    /// Copies pending request bytes into `buf`.
    ///
    /// `Ok(0)` signals the end of the request. `WouldBlock` means nothing is
    /// available yet; any other error is fatal to the stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Writes as much of `reader` as the engine accepts right now and returns
    /// the number of bytes taken, which may be fewer than remain.
    fn write_from(&mut self, reader: &mut dyn ResourceReader) -> io::Result<usize>;

    /// Sends response metadata. Called at most once per stream.
    fn send_headers(&mut self, fields: &[Header]) -> io::Result<()>;

    fn want_read(&mut self, enabled: bool);

    fn want_write(&mut self, enabled: bool);

    fn shutdown(&mut self, direction: Direction);

    /// Aborts the stream. The engine follows up with a close event.
    fn close(&mut self);
}
