use std::fs::Metadata;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::http::date;
use crate::http::mime;
use crate::http::request::{HeaderMap, Request};

/// Protocol string used for responses not tied to a parsed request.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes supported by the server.
///
/// - `Ok` (200): File found and served
/// - `BadRequest` (400): Request could not be parsed
/// - `NotFound` (404): No servable file for the target
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
    /// # use statica::http::response::StatusCode;
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

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use statica::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete HTTP response ready to be written to a client.
///
/// The body is never held in memory: `file` names the file whose contents
/// the writer streams after the head.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Protocol for the status line
    pub protocol: String,
    /// Response headers; sorted when written
    pub headers: HeaderMap,
    /// File served as the body, if any
    pub file: Option<PathBuf>,
    /// Number of body bytes advertised in Content-Length
    pub body_len: u64,
    /// The request this response answers. `None` for 400 and 404.
    pub request: Option<Request>,
}

impl Response {
    /// Creates a 200 OK response serving `path`, described by `meta`.
    ///
    /// The protocol is copied from the request, and `Connection: close` is
    /// set only when the request asked for it.
    pub fn ok(request: Request, path: PathBuf, meta: &Metadata) -> Self {
        let now = SystemTime::now();
        let mut headers = HeaderMap::new();
        headers.insert("Date", date::format_http_date(now));
        headers.insert(
            "Last-Modified",
            date::format_http_date(last_modified(meta.modified(), now)),
        );
        headers.insert("Content-Type", mime::content_type_for_path(&path));
        headers.insert("Content-Length", meta.len().to_string());
        if request.close {
            headers.insert("Connection", "close");
        }

        Self {
            status: StatusCode::Ok,
            protocol: request.version.clone(),
            headers,
            file: Some(path),
            body_len: meta.len(),
            request: Some(request),
        }
    }

    /// Creates a 404 Not Found response. Always closes the connection.
    pub fn not_found() -> Self {
        Self::closing(StatusCode::NotFound)
    }

    /// Creates a 400 Bad Request response. Always closes the connection.
    pub fn bad_request() -> Self {
        Self::closing(StatusCode::BadRequest)
    }

    fn closing(status: StatusCode) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Date", date::now());
        headers.insert("Connection", "close");

        Self {
            status,
            protocol: HTTP_VERSION.to_string(),
            headers,
            file: None,
            body_len: 0,
            request: None,
        }
    }

    /// Whether the connection must close once this response is written.
    pub fn closes_connection(&self) -> bool {
        self.status != StatusCode::Ok || self.request.as_ref().is_some_and(|r| !r.keep_alive())
    }
}

/// Modification time for Last-Modified. Platforms without mtime support
/// report the response time instead.
fn last_modified(modified: io::Result<SystemTime>, now: SystemTime) -> SystemTime {
    modified.unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn last_modified_prefers_file_mtime() {
        let mtime = UNIX_EPOCH + Duration::from_secs(1_000);
        let now = UNIX_EPOCH + Duration::from_secs(2_000);
        assert_eq!(last_modified(Ok(mtime), now), mtime);
    }

    #[test]
    fn last_modified_falls_back_to_now() {
        let now = UNIX_EPOCH + Duration::from_secs(2_000);
        let unsupported = io::Error::new(io::ErrorKind::Unsupported, "no mtime");
        assert_eq!(last_modified(Err(unsupported), now), now);
    }
}
