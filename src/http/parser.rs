use thiserror::Error;

use crate::http::request::{HeaderMap, Method, Request};

/// Largest request head (start line plus headers) accepted before the
/// blank line arrives.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

const SUPPORTED_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedStartLine(String),
    #[error("unsupported method: {0:?}")]
    UnsupportedMethod(String),
    #[error("invalid request target: {0:?}")]
    InvalidTarget(String),
    #[error("unsupported version: {0:?}")]
    UnsupportedVersion(String),
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    #[error("missing Host header")]
    MissingHost,
    #[error("request head exceeds {} bytes", MAX_HEAD_BYTES)]
    HeadTooLarge,
    #[error("incomplete request")]
    Incomplete,
}

/// Parses one request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied. Lines are
/// validated as soon as they are complete, so a bad start line fails before
/// the header block has arrived. `ParseError::Incomplete` means no error was
/// found yet and more input is needed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let mut lines = Lines { buf, pos: 0 };

    let Some(start_line) = lines.next_line() else {
        return Err(incomplete(buf));
    };
    let start_line = std::str::from_utf8(start_line)
        .map_err(|_| ParseError::MalformedStartLine(lossy(start_line)))?;
    let (method, path, version) = parse_start_line(start_line)?;

    let mut headers = HeaderMap::new();

    loop {
        let Some(line) = lines.next_line() else {
            return Err(incomplete(buf));
        };

        if line.is_empty() {
            break;
        }

        let line = std::str::from_utf8(line)
            .map_err(|_| ParseError::MalformedHeader(lossy(line)))?;
        let (name, value) = parse_header_line(line)?;
        headers.insert(name, value);
    }

    let host = headers.remove("Host").ok_or(ParseError::MissingHost)?;
    let close = headers
        .remove("Connection")
        .is_some_and(|v| v == "close");

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        host,
        close,
    };

    Ok((request, lines.pos))
}

fn parse_start_line(line: &str) -> Result<(Method, &str, &str), ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();

    let well_formed = fields.len() == 3
        && fields
            .iter()
            .all(|f| !f.is_empty() && !f.contains(char::is_whitespace));
    if !well_formed {
        return Err(ParseError::MalformedStartLine(line.to_string()));
    }

    let (method, target, version) = (fields[0], fields[1], fields[2]);

    let method =
        Method::from_str(method).ok_or_else(|| ParseError::UnsupportedMethod(method.to_string()))?;

    if !target.starts_with('/') {
        return Err(ParseError::InvalidTarget(target.to_string()));
    }

    if version != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    Ok((method, target, version))
}

/// Splits a header line on its first colon. The value keeps everything
/// after the optional leading whitespace, including trailing spaces.
fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

    if !is_valid_header_name(name) {
        return Err(ParseError::MalformedHeader(line.to_string()));
    }

    Ok((name, value.trim_start_matches([' ', '\t'])))
}

fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn incomplete(buf: &[u8]) -> ParseError {
    if buf.len() > MAX_HEAD_BYTES {
        ParseError::HeadTooLarge
    } else {
        ParseError::Incomplete
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// CRLF-terminated lines over a byte buffer.
struct Lines<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Lines<'a> {
    /// Next complete line without its CRLF, or `None` if the rest of the
    /// buffer holds no CRLF.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        let end = rest.windows(2).position(|w| w == b"\r\n")?;
        self.pos += end + 2;
        Some(&rest[..end])
    }
}
