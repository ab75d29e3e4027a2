//! Request-line parsing and response metadata.
//!
//! Only the request target is interpreted: the stream must start with
//! `GET <path> HTTP`. Everything else about the request (version, headers,
//! body) is ignored.
//!
//! - **`parser`**: extracts the target path from an accumulated request buffer
//! - **`mime`**: content-type selection from the resolved file name
//! - **`response`**: status codes and the two-field response head
//! - **`writer`**: renders a response head as text for the TCP transport

pub mod mime;
pub mod parser;
pub mod response;
pub mod writer;
