use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout_at, Instant};

use crate::http::builder::ResponseBuilder;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 4096;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("connection closed by peer")]
    Closed,
    #[error("no complete request within {0:?}")]
    TimedOut(Duration),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// A failed attempt to read one request.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ReadFailure {
    pub error: ReadError,
    /// Whether any bytes of the request had arrived when reading stopped.
    pub bytes_consumed: bool,
}

impl ReadFailure {
    /// True when the client simply went away or went quiet between
    /// requests. Such connections close without a response.
    pub fn is_idle(&self) -> bool {
        !self.bytes_consumed && matches!(self.error, ReadError::Closed | ReadError::TimedOut(_))
    }
}

pub enum ConnectionState {
    AwaitingRequest,
    Responding(Response),
    Closed,
}

/// One client connection, served until a response requires closing, the
/// client leaves, or it stays idle past the deadline.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    builder: Arc<ResponseBuilder>,
    idle_timeout: Duration,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, builder: Arc<ResponseBuilder>, idle_timeout: Duration) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::AwaitingRequest,
            builder,
            idle_timeout,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::AwaitingRequest => {
                    self.state = match self.read_request().await {
                        Ok(req) => {
                            tracing::debug!(
                                method = req.method.as_str(),
                                path = %req.path,
                                host = %req.host,
                                "Request received"
                            );
                            ConnectionState::Responding(self.builder.classify(req))
                        }

                        Err(failure) if failure.is_idle() => {
                            tracing::debug!(reason = %failure, "Closing idle connection");
                            ConnectionState::Closed
                        }

                        Err(failure) => {
                            tracing::warn!(
                                error = %failure,
                                bytes_consumed = failure.bytes_consumed,
                                "Rejecting request"
                            );
                            ConnectionState::Responding(Response::bad_request())
                        }
                    };
                }

                ConnectionState::Responding(response) => {
                    ResponseWriter::new(&response)
                        .write_to_stream(&mut self.stream)
                        .await?;

                    tracing::debug!(status = response.status.as_u16(), "Response sent");

                    if response.closes_connection() {
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::AwaitingRequest; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        // The peer may already be gone.
        let _ = self.stream.shutdown().await;

        Ok(())
    }

    /// Reads the next request, waiting at most `idle_timeout` for it to
    /// arrive in full. Bytes left over from the previous request are parsed
    /// first and count as received.
    pub async fn read_request(&mut self) -> Result<Request, ReadFailure> {
        let deadline = Instant::now() + self.idle_timeout;

        loop {
            // Try parsing whatever we already have
            if !self.buffer.is_empty() {
                match parse_http_request(&self.buffer) {
                    Ok((request, consumed)) => {
                        self.buffer.advance(consumed);
                        return Ok(request);
                    }

                    Err(ParseError::Incomplete) => {}

                    Err(e) => return Err(self.failure(e.into())),
                }
            }

            // Read more data
            self.buffer.reserve(READ_CHUNK);
            match timeout_at(deadline, self.stream.read_buf(&mut self.buffer)).await {
                Err(_) => return Err(self.failure(ReadError::TimedOut(self.idle_timeout))),
                Ok(Err(e)) => return Err(self.failure(e.into())),
                // Client closed connection
                Ok(Ok(0)) => return Err(self.failure(ReadError::Closed)),
                Ok(Ok(_)) => {}
            }
        }
    }

    fn failure(&self, error: ReadError) -> ReadFailure {
        ReadFailure {
            error,
            bytes_consumed: !self.buffer.is_empty(),
        }
    }
}
