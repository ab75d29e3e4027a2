//! A [`StreamTransport`] over one TCP connection.
//!
//! Each socket carries a single stream. The adapter buffers what the socket
//! delivered and what the session wrote; the listener task moves bytes
//! between those buffers and the socket and turns buffer state into
//! readiness events.

use std::io;

use bytes::{Buf, Bytes, BytesMut};

use crate::http::writer::serialize_head;
use crate::resource::ResourceReader;
use crate::transport::{Direction, Header, StreamTransport};

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug)]
pub struct TcpStreamIo {
    inbound: BytesMut,
    /// Last bytes fed, to spot a terminator split across feeds.
    tail: Vec<u8>,
    end_of_request: bool,
    read_error: Option<io::Error>,
    outbound: BytesMut,
    write_window: usize,
    want_read: bool,
    want_write: bool,
    read_shut: bool,
    write_shut: bool,
    closed: bool,
}

impl TcpStreamIo {
    pub fn new(write_window: usize) -> Self {
        Self {
            inbound: BytesMut::new(),
            tail: Vec::with_capacity(HEAD_TERMINATOR.len()),
            end_of_request: false,
            read_error: None,
            outbound: BytesMut::new(),
            write_window: write_window.max(1),
            want_read: false,
            want_write: false,
            read_shut: false,
            write_shut: false,
            closed: false,
        }
    }

    /// Queues bytes received from the socket.
    ///
    /// The request ends at the blank line closing the request head; anything
    /// after it is dropped.
    pub fn feed(&mut self, data: &[u8]) {
        if self.end_of_request {
            return;
        }

        let mut window = std::mem::take(&mut self.tail);
        let carried = window.len();
        window.extend_from_slice(data);

        match window
            .windows(HEAD_TERMINATOR.len())
            .position(|w| w == HEAD_TERMINATOR)
        {
            Some(pos) => {
                let keep = pos + HEAD_TERMINATOR.len() - carried;
                self.inbound.extend_from_slice(&data[..keep]);
                self.end_of_request = true;
            }
            None => {
                self.inbound.extend_from_slice(data);
                let from = window.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
                self.tail = window.split_off(from);
            }
        }
    }

    /// The peer half-closed its side.
    pub fn finish_input(&mut self) {
        self.end_of_request = true;
    }

    /// The socket read failed; the session sees the error on its next read.
    pub fn fail_input(&mut self, err: io::Error) {
        self.read_error = Some(err);
    }

    /// Whether a read event can be delivered without waiting on the socket.
    pub fn has_input(&self) -> bool {
        !self.inbound.is_empty() || self.end_of_request || self.read_error.is_some()
    }

    pub fn wants_read(&self) -> bool {
        self.want_read && !self.read_shut && !self.closed
    }

    pub fn wants_write(&self) -> bool {
        self.want_write && !self.write_shut && !self.closed
    }

    pub fn is_write_shut(&self) -> bool {
        self.write_shut
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Takes everything written since the last call.
    pub fn take_output(&mut self) -> Bytes {
        self.outbound.split().freeze()
    }
}

impl StreamTransport for TcpStreamIo {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(err) = self.read_error.take() {
            return Err(err);
        }

        if !self.inbound.is_empty() {
            let n = buf.len().min(self.inbound.len());
            self.inbound.copy_to_slice(&mut buf[..n]);
            return Ok(n);
        }

        if self.end_of_request {
            Ok(0)
        } else {
            Err(io::ErrorKind::WouldBlock.into())
        }
    }

    fn write_from(&mut self, reader: &mut dyn ResourceReader) -> io::Result<usize> {
        if self.write_shut || self.closed {
            return Err(io::ErrorKind::BrokenPipe.into());
        }

        let budget = self.write_window.saturating_sub(self.outbound.len());
        let remaining = usize::try_from(reader.remaining()).unwrap_or(usize::MAX);
        let want = budget.min(remaining);

        let start = self.outbound.len();
        self.outbound.resize(start + want, 0);

        let mut filled = 0;
        while filled < want {
            match reader.read_chunk(&mut self.outbound[start + filled..start + want]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) => {
                    self.outbound.truncate(start + filled);
                    return Err(e);
                }
            }
        }

        self.outbound.truncate(start + filled);
        Ok(filled)
    }

    fn send_headers(&mut self, fields: &[Header]) -> io::Result<()> {
        if self.write_shut || self.closed {
            return Err(io::ErrorKind::BrokenPipe.into());
        }

        serialize_head(fields, &mut self.outbound);
        Ok(())
    }

    fn want_read(&mut self, enabled: bool) {
        self.want_read = enabled;
    }

    fn want_write(&mut self, enabled: bool) {
        self.want_write = enabled;
    }

    fn shutdown(&mut self, direction: Direction) {
        match direction {
            Direction::Read => {
                self.read_shut = true;
                self.inbound.clear();
            }
            Direction::Write => self.write_shut = true,
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.outbound.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_split_across_feeds_ends_request() {
        let mut io = TcpStreamIo::new(64);
        io.feed(b"GET /a HTTP/1.1\r\n\r");
        assert!(!io.end_of_request);

        io.feed(b"\nleftover");
        assert!(io.end_of_request);
        assert_eq!(&io.inbound[..], b"GET /a HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn read_reports_would_block_then_end() {
        let mut io = TcpStreamIo::new(64);
        let mut buf = [0u8; 8];

        let err = io.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);

        io.finish_input();
        assert_eq!(io.read(&mut buf).unwrap(), 0);
    }
}
