use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Serializes the status line and headers, sorted by name, followed by the
/// blank line that ends the head.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.protocol,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in resp.headers.sorted() {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes one response: head, then the file body if there is one.
pub struct ResponseWriter<'a> {
    response: &'a Response,
    head: Vec<u8>,
    written: usize,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(response: &'a Response) -> Self {
        Self {
            response,
            head: serialize_head(response),
            written: 0,
        }
    }

    /// Writes the full response. Any error leaves the stream in an unknown
    /// state; the caller drops the connection.
    ///
    /// The body file is opened before anything is written, and exactly
    /// `body_len` bytes of it are sent, matching the advertised
    /// Content-Length even if the file changed since classification.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut body = match &self.response.file {
            Some(path) => Some(
                File::open(path)
                    .await
                    .with_context(|| format!("failed to open {}", path.display()))?,
            ),
            None => None,
        };

        while self.written < self.head.len() {
            let n = stream.write(&self.head[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        if let Some(file) = body.as_mut() {
            let expected = self.response.body_len;
            let copied = tokio::io::copy(&mut file.take(expected), stream)
                .await
                .context("failed to write response body")?;

            if copied < expected {
                anyhow::bail!("body ended after {copied} of {expected} bytes");
            }

            tracing::trace!(bytes = copied, "Body written");
        }

        stream.flush().await?;
        Ok(())
    }
}
