use bytes::{BufMut, BytesMut};

use crate::http::response::StatusCode;
use crate::transport::Header;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Renders header fields as an HTTP/1.1 status block.
///
/// The `:status` pseudo-field becomes the status line; every other field is
/// written as `name: value`. Unknown status values fall back to a bare code.
pub fn serialize_head(fields: &[Header], buf: &mut BytesMut) {
    let status = fields
        .iter()
        .find(|h| h.name == ":status")
        .map(|h| h.value.as_str())
        .unwrap_or("200");

    // Status line
    let status_line = format!("{} {} {}\r\n", HTTP_VERSION, status, reason_for(status));
    buf.put_slice(status_line.as_bytes());

    // Headers
    for field in fields.iter().filter(|h| !h.name.starts_with(':')) {
        buf.put_slice(field.name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(field.value.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // The body is delimited by closing the write half.
    buf.put_slice(b"connection: close\r\n");

    // Header/body separator
    buf.put_slice(b"\r\n");
}

fn reason_for(status: &str) -> &'static str {
    [StatusCode::Ok, StatusCode::BadRequest, StatusCode::NotFound]
        .into_iter()
        .find(|code| code.as_str() == status)
        .map(|code| code.reason_phrase())
        .unwrap_or("")
}
