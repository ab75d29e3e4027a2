use crate::transport::Header;

/// Status codes a stream can answer with.
///
/// - `Ok` (200): the resource is streamed as the body
/// - `BadRequest` (400): the request line could not be parsed
/// - `NotFound` (404): no readable resource behind the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use vidstream::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// The value carried by the `:status` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "200",
            StatusCode::BadRequest => "400",
            StatusCode::NotFound => "404",
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

/// Response metadata: the only thing emitted before the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub content_type: &'static str,
}

impl ResponseHead {
    pub fn new(status: StatusCode, content_type: &'static str) -> Self {
        Self {
            status,
            content_type,
        }
    }

    /// Header-only answer for a failed request.
    pub fn error(status: StatusCode) -> Self {
        Self::new(status, "text/plain")
    }

    /// The two header fields, in emission order.
    pub fn fields(&self) -> [Header; 2] {
        [
            Header::new(":status", self.status.as_str()),
            Header::new("content-type", self.content_type),
        ]
    }
}
