//! Shared fixtures: a scripted transport and throwaway document roots.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use vidstream::resource::ResourceReader;
use vidstream::session::{StreamSession, StreamState};
use vidstream::transport::{Direction, Header, StreamTransport};

/// What the next `read` call returns.
pub enum ReadStep {
    Data(Vec<u8>),
    End,
    Fail,
}

/// Records everything the session asks of the transport.
pub struct MockTransport {
    script: VecDeque<ReadStep>,
    /// Max bytes accepted per `write_from` call.
    pub write_limit: usize,
    pub headers: Vec<Vec<Header>>,
    pub body: Vec<u8>,
    pub write_calls: usize,
    pub want_read: bool,
    pub want_write: bool,
    pub shutdowns: Vec<Direction>,
    pub closed: bool,
    pub fail_headers: bool,
    pub fail_writes: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            write_limit: usize::MAX,
            headers: Vec::new(),
            body: Vec::new(),
            write_calls: 0,
            want_read: false,
            want_write: false,
            shutdowns: Vec::new(),
            closed: false,
            fail_headers: false,
            fail_writes: false,
        }
    }

    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = limit;
        self
    }

    pub fn push(&mut self, data: &[u8]) {
        self.script.push_back(ReadStep::Data(data.to_vec()));
    }

    pub fn push_end(&mut self) {
        self.script.push_back(ReadStep::End);
    }

    pub fn push_error(&mut self) {
        self.script.push_back(ReadStep::Fail);
    }

    pub fn script_is_drained(&self) -> bool {
        self.script.is_empty()
    }

    /// Value of a header field from the single header emission.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .first()?
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    pub fn write_shut(&self) -> bool {
        self.shutdowns.contains(&Direction::Write)
    }
}

impl StreamTransport for MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.script.pop_front() {
            Some(ReadStep::Data(mut data)) => {
                let n = buf.len().min(data.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    let rest = data.split_off(n);
                    self.script.push_front(ReadStep::Data(rest));
                }
                Ok(n)
            }
            Some(ReadStep::End) => Ok(0),
            Some(ReadStep::Fail) => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            None => Err(io::ErrorKind::WouldBlock.into()),
        }
    }

    fn write_from(&mut self, reader: &mut dyn ResourceReader) -> io::Result<usize> {
        self.write_calls += 1;
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "reset"));
        }

        let want = self.write_limit.min(reader.remaining() as usize);
        let mut chunk = vec![0u8; want];
        let mut filled = 0;
        while filled < want {
            let n = reader.read_chunk(&mut chunk[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        self.body.extend_from_slice(&chunk[..filled]);
        Ok(filled)
    }

    fn send_headers(&mut self, fields: &[Header]) -> io::Result<()> {
        if self.fail_headers {
            return Err(io::Error::new(io::ErrorKind::Other, "header block rejected"));
        }
        self.headers.push(fields.to_vec());
        Ok(())
    }

    fn want_read(&mut self, enabled: bool) {
        self.want_read = enabled;
    }

    fn want_write(&mut self, enabled: bool) {
        self.want_write = enabled;
    }

    fn shutdown(&mut self, direction: Direction) {
        self.shutdowns.push(direction);
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Delivers read events while the session wants them and input is scripted,
/// then write events until it stops asking. Returns the write events fired.
pub fn drive(session: &mut StreamSession, io: &mut MockTransport) -> usize {
    while io.want_read && !io.closed && !io.script.is_empty() {
        session.on_read(io);
    }

    let mut events = 0;
    while io.want_write && !io.closed {
        session.on_write(io);
        events += 1;
        assert!(events < 100_000, "session never finished writing");
    }
    events
}

pub fn is_done(session: &StreamSession) -> bool {
    matches!(session.state(), StreamState::Finished | StreamState::Closed)
}

/// A document root under the system temp dir, removed on drop.
pub struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub fn new() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "vidstream-test-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let file = self.path.join(name);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&file, contents).unwrap();
        file
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
