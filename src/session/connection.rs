use std::rc::Rc;

use tracing::{debug, info};

use crate::session::state::ServerState;
use crate::session::stream::StreamSession;
use crate::transport::StreamTransport;

/// Per-connection state, alive from connection open to connection close.
///
/// The live-connection counter is bumped on open and dropped again when the
/// session goes away, whichever way that happens.
#[derive(Debug)]
pub struct ConnectionSession {
    id: u64,
    server: Rc<ServerState>,
    peer: Option<String>,
}

impl ConnectionSession {
    pub fn open(id: u64, server: Rc<ServerState>, peer: Option<String>) -> Self {
        server.connection_opened();
        debug!(
            conn = id,
            peer = peer.as_deref().unwrap_or("<not set>"),
            live = server.live_connections(),
            "New connection"
        );

        Self { id, server, peer }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Informational peer identity negotiated by the transport, if any.
    pub fn peer(&self) -> Option<&str> {
        self.peer.as_deref()
    }

    /// Starts a stream session bound to this connection's server state.
    pub fn open_stream<T>(&self, stream_id: u64, io: &mut T) -> StreamSession
    where
        T: StreamTransport + ?Sized,
    {
        StreamSession::open(stream_id, Rc::clone(&self.server), io)
    }

    /// Handles the connection-closed event.
    pub fn close(self) {}
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        self.server.connection_closed();
        info!(
            conn = self.id,
            live = self.server.live_connections(),
            "Connection closed"
        );
    }
}
