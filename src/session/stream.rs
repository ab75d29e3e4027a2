use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::http::mime::select_content_type;
use crate::http::parser::parse_request_path;
use crate::http::response::{ResponseHead, StatusCode};
use crate::resource::{ResolveError, ResourceReader};
use crate::session::state::ServerState;
use crate::transport::{Direction, StreamTransport};

/// How much of the request is echoed into the log.
const LOGGED_REQUEST_BYTES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Accumulating request bytes.
    AwaitingRequest,
    /// End of request seen; parsing and resolving.
    RequestComplete,
    /// Response head decided, waiting for write readiness.
    Responding,
    /// Head sent, body still draining.
    Draining,
    /// Write side shut down; only the close event is left.
    Finished,
    /// Aborted after a transport or allocation failure.
    Closed,
}

/// Per-stream state: one request in, one response out.
///
/// The session is driven entirely by transport events. It suspends by
/// registering read or write interest and returning; it never blocks.
/// [`StreamSession::on_close`] consumes the session, so the request buffer,
/// paths and reader are released exactly once whichever state it was in.
pub struct StreamSession {
    id: u64,
    server: Rc<ServerState>,
    state: StreamState,
    buffer: Vec<u8>,
    request_path: Option<String>,
    file_path: Option<PathBuf>,
    reader: Option<Box<dyn ResourceReader>>,
    head: Option<ResponseHead>,
    headers_sent: bool,
    bytes_sent: u64,
}

impl StreamSession {
    /// Handles the stream-open event and asks for the request.
    pub fn open<T>(id: u64, server: Rc<ServerState>, io: &mut T) -> Self
    where
        T: StreamTransport + ?Sized,
    {
        io.want_read(true);

        Self {
            id,
            server,
            state: StreamState::AwaitingRequest,
            buffer: Vec::new(),
            request_path: None,
            file_path: None,
            reader: None,
            head: None,
            headers_sent: false,
            bytes_sent: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Request bytes accumulated so far.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    pub fn request_path(&self) -> Option<&str> {
        self.request_path.as_deref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.head.map(|head| head.status)
    }

    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    pub fn has_reader(&self) -> bool {
        self.reader.is_some()
    }

    /// Handles read readiness.
    pub fn on_read<T>(&mut self, io: &mut T)
    where
        T: StreamTransport + ?Sized,
    {
        if self.state != StreamState::AwaitingRequest {
            // The request is complete; nothing more goes into the buffer.
            io.want_read(false);
            return;
        }

        let chunk = self.server.read_chunk();
        if self.buffer.try_reserve(chunk).is_err() {
            error!(stream = self.id, "Memory allocation failed");
            self.abort(io);
            return;
        }

        let start = self.buffer.len();
        self.buffer.resize(start + chunk, 0);
        let result = io.read(&mut self.buffer[start..]);

        match result {
            Ok(0) => {
                self.buffer.truncate(start);
                self.complete_request(io);
            }
            Ok(n) => {
                self.buffer.truncate(start + n);
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                self.buffer.truncate(start);
            }
            Err(e) => {
                self.buffer.truncate(start);
                error!(stream = self.id, error = %e, "Error reading");
                self.abort(io);
            }
        }
    }

    fn complete_request<T>(&mut self, io: &mut T)
    where
        T: StreamTransport + ?Sized,
    {
        self.state = StreamState::RequestComplete;
        io.want_read(false);

        let shown = self.buffer.len().min(LOGGED_REQUEST_BYTES);
        info!(
            stream = self.id,
            request = %String::from_utf8_lossy(&self.buffer[..shown]),
            "Got request"
        );

        let head = match parse_request_path(&self.buffer) {
            Ok(path) => self.resolve(path),
            Err(e) => {
                warn!(stream = self.id, error = ?e, "Failed to parse request path");
                ResponseHead::error(StatusCode::BadRequest)
            }
        };

        self.head = Some(head);
        io.shutdown(Direction::Read);
        io.want_write(true);
        self.state = StreamState::Responding;
    }

    fn resolve(&mut self, path: String) -> ResponseHead {
        let server = Rc::clone(&self.server);
        let resolver = server.resolver();
        let file_path = resolver.file_path(&path);

        info!(stream = self.id, file = %file_path.display(), "Serving file");

        let opened = resolver.open(&path, &file_path);
        let content_type = select_content_type(&file_path.to_string_lossy());

        self.request_path = Some(path);
        self.file_path = Some(file_path);

        match opened {
            Ok(reader) => {
                self.reader = Some(Box::new(reader));
                ResponseHead::new(StatusCode::Ok, content_type)
            }
            Err(ResolveError::NotFound(p)) => {
                warn!(stream = self.id, file = %p.display(), "File not found");
                ResponseHead::error(StatusCode::NotFound)
            }
            Err(ResolveError::Forbidden(p)) => {
                warn!(stream = self.id, file = %p.display(), "Path escapes document root");
                ResponseHead::error(StatusCode::NotFound)
            }
        }
    }

    /// Handles write readiness.
    ///
    /// Sends the head on the first call, then offers the reader to the
    /// transport once per call until it is drained.
    pub fn on_write<T>(&mut self, io: &mut T)
    where
        T: StreamTransport + ?Sized,
    {
        if !matches!(self.state, StreamState::Responding | StreamState::Draining) {
            io.want_write(false);
            return;
        }

        if !self.headers_sent {
            let Some(head) = self.head else {
                self.abort(io);
                return;
            };

            if let Err(e) = io.send_headers(&head.fields()) {
                error!(stream = self.id, error = %e, "Cannot send headers");
                self.abort(io);
                return;
            }

            self.headers_sent = true;
            self.state = StreamState::Draining;
        }

        let written = match self.reader.as_mut() {
            Some(reader) if reader.remaining() > 0 => {
                match io.write_from(&mut **reader) {
                    Ok(n) => Ok(Some((n, reader.remaining()))),
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                        Ok(Some((0, reader.remaining())))
                    }
                    Err(e) => Err(e),
                }
            }
            _ => Ok(None),
        };

        match written {
            Ok(Some((n, left))) => {
                self.bytes_sent += n as u64;
                if left > 0 {
                    io.want_write(true);
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(stream = self.id, error = %e, "Write error");
                self.abort(io);
                return;
            }
        }

        io.want_write(false);
        io.shutdown(Direction::Write);
        self.state = StreamState::Finished;
        debug!(stream = self.id, bytes = self.bytes_sent, "Response complete");
    }

    /// Handles the stream-close event from any state.
    pub fn on_close(self) {
        debug!(stream = self.id, state = ?self.state, "Stream closed");
    }

    fn abort<T>(&mut self, io: &mut T)
    where
        T: StreamTransport + ?Sized,
    {
        self.reader = None;
        self.buffer = Vec::new();
        self.state = StreamState::Closed;
        io.close();
    }
}

impl std::fmt::Debug for StreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("request_path", &self.request_path)
            .field("file_path", &self.file_path)
            .field("has_reader", &self.reader.is_some())
            .field("headers_sent", &self.headers_sent)
            .finish()
    }
}
