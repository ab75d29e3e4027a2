/// Reasons a request buffer is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer bytes than the method prefix plus one path byte.
    TooShort,
    /// The buffer does not start with `GET `.
    InvalidMethod,
    /// No ` HTTP` marker follows the path.
    MissingVersion,
    /// The path bytes are not valid UTF-8.
    InvalidPath,
}

const METHOD_PREFIX: &[u8] = b"GET ";
const VERSION_MARKER: &[u8] = b" HTTP";
const MIN_REQUEST_LEN: usize = METHOD_PREFIX.len() + 1;

/// Extracts the request target from an accumulated request buffer.
///
/// The buffer must look like `GET <path> HTTP...`; everything after the
/// marker (version, headers, body) is ignored. The path is returned exactly
/// as received: no percent-decoding and no normalisation.
///
/// The buffer is treated as text, so scanning for the marker stops at the
/// first NUL byte.
pub fn parse_request_path(buf: &[u8]) -> Result<String, ParseError> {
    if buf.len() < MIN_REQUEST_LEN {
        return Err(ParseError::TooShort);
    }

    if !buf.starts_with(METHOD_PREFIX) {
        return Err(ParseError::InvalidMethod);
    }

    let rest = &buf[METHOD_PREFIX.len()..];
    let text = match rest.iter().position(|&b| b == 0) {
        Some(nul) => &rest[..nul],
        None => rest,
    };

    let end = find_marker(text).ok_or(ParseError::MissingVersion)?;

    let path = std::str::from_utf8(&text[..end]).map_err(|_| ParseError::InvalidPath)?;

    Ok(path.to_string())
}

fn find_marker(buf: &[u8]) -> Option<usize> {
    buf.windows(VERSION_MARKER.len())
        .position(|w| w == VERSION_MARKER)
}
