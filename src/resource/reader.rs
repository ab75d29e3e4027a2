use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[cfg(test)]
use bytes::{Buf, Bytes};

/// A finite byte source that knows how much is left.
pub trait ResourceReader {
    /// Bytes not yet handed out.
    fn remaining(&self) -> u64;

    /// Fills `buf` with the next chunk and returns its length.
    ///
    /// Returns `Ok(0)` only once the source is exhausted.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Streams a regular file without loading it into memory.
#[derive(Debug)]
pub struct FileReader {
    file: File,
    remaining: u64,
}

impl FileReader {
    /// Opens `path` and records its length.
    ///
    /// Anything that is not a regular file is reported as `NotFound`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let meta = file.metadata()?;

        if !meta.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "not a regular file"));
        }

        Ok(Self {
            file,
            remaining: meta.len(),
        })
    }
}

impl ResourceReader for FileReader {
    fn remaining(&self) -> u64 {
        self.remaining
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        if want == 0 {
            return Ok(0);
        }

        let n = self.file.read(&mut buf[..want])?;
        if n == 0 {
            // File shrank underneath us.
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file truncated while streaming",
            ));
        }

        self.remaining -= n as u64;
        Ok(n)
    }
}

/// In-memory source for unit tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct BytesReader {
    data: Bytes,
}

#[cfg(test)]
impl BytesReader {
    pub(crate) fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[cfg(test)]
impl ResourceReader for BytesReader {
    fn remaining(&self) -> u64 {
        self.data.remaining() as u64
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.data.remaining());
        self.data.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }
}
