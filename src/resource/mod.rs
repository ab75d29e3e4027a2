//! Servable resources under the document root.

pub mod reader;
pub mod resolver;

pub use reader::{FileReader, ResourceReader};
#[cfg(test)]
pub(crate) use reader::BytesReader;
pub use resolver::{ResolveError, Resolver};
