use std::cell::Cell;

use crate::config::Config;
use crate::resource::Resolver;

/// Upper bound on bytes pulled from the transport per read event.
pub const DEFAULT_READ_CHUNK: usize = 1023;

/// Process-wide state shared by every session.
///
/// Only ever touched from the single dispatch thread, so the connection
/// counter is a plain `Cell`.
#[derive(Debug)]
pub struct ServerState {
    resolver: Resolver,
    read_chunk: usize,
    live_connections: Cell<usize>,
}

impl ServerState {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            read_chunk: DEFAULT_READ_CHUNK,
            live_connections: Cell::new(0),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let resolver = Resolver::new(cfg.server.document_root.clone())
            .contain_paths(cfg.stream.contain_paths);

        Self::new(resolver).with_read_chunk(cfg.stream.read_chunk)
    }

    pub fn with_read_chunk(mut self, read_chunk: usize) -> Self {
        self.read_chunk = read_chunk.max(1);
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn document_root(&self) -> &str {
        self.resolver.root()
    }

    pub fn read_chunk(&self) -> usize {
        self.read_chunk
    }

    /// Number of connection sessions currently open.
    pub fn live_connections(&self) -> usize {
        self.live_connections.get()
    }

    pub(crate) fn connection_opened(&self) {
        self.live_connections.set(self.live_connections.get() + 1);
    }

    pub(crate) fn connection_closed(&self) {
        let live = self.live_connections.get();
        debug_assert!(live > 0, "connection counter underflow");
        self.live_connections.set(live.saturating_sub(1));
    }
}
