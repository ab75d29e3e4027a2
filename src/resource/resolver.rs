use std::io;
use std::path::{Path, PathBuf};

use crate::resource::reader::FileReader;

/// Why a request path has no servable resource behind it.
#[derive(Debug)]
pub enum ResolveError {
    /// Nothing readable at the path.
    NotFound(PathBuf),
    /// The path tries to step outside the document root.
    Forbidden(PathBuf),
}

/// Maps request paths onto files under a document root.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: String,
    contain_paths: bool,
}

impl Resolver {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            contain_paths: true,
        }
    }

    /// Whether request paths with `..` segments are refused.
    pub fn contain_paths(mut self, enabled: bool) -> Self {
        self.contain_paths = enabled;
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Joins the document root and a request path.
    ///
    /// A separator is inserted only when the request path does not already
    /// start with one; nothing is decoded or normalised.
    ///
    /// ```
    /// # use vidstream::resource::Resolver;
    /// # use std::path::PathBuf;
    /// let resolver = Resolver::new("/videos");
    /// assert_eq!(resolver.file_path("/a.mp4"), PathBuf::from("/videos/a.mp4"));
    /// assert_eq!(resolver.file_path("a.mp4"), PathBuf::from("/videos/a.mp4"));
    /// ```
    pub fn file_path(&self, request_path: &str) -> PathBuf {
        let mut joined = String::with_capacity(self.root.len() + request_path.len() + 1);
        joined.push_str(&self.root);
        if !request_path.starts_with('/') {
            joined.push('/');
        }
        joined.push_str(request_path);
        PathBuf::from(joined)
    }

    /// Opens the resource for `request_path`, already joined as `file_path`.
    pub fn open(&self, request_path: &str, file_path: &Path) -> Result<FileReader, ResolveError> {
        if self.contain_paths && escapes_root(request_path) {
            return Err(ResolveError::Forbidden(file_path.to_path_buf()));
        }

        FileReader::open(file_path).map_err(|err| {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::debug!(path = %file_path.display(), error = %err, "Open failed");
            }
            ResolveError::NotFound(file_path.to_path_buf())
        })
    }
}

fn escapes_root(request_path: &str) -> bool {
    request_path.split('/').any(|segment| segment == "..")
}
