use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::builder::ResponseBuilder;
use crate::http::connection::Connection;

/// Source of inbound connections for [`serve`].
pub trait Acceptor {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn accept(&mut self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;
}

impl Acceptor for TcpListener {
    type Stream = TcpStream;

    fn accept(&mut self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        TcpListener::accept(self)
    }
}

/// Validates `cfg`, binds its listen address and serves until the task is
/// cancelled.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    cfg.validate()?;

    let builder = ResponseBuilder::new(&cfg.static_files.doc_root)
        .context("failed to resolve doc root")?;

    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!(
        addr = %listener.local_addr()?,
        doc_root = %builder.doc_root().display(),
        "Listening"
    );

    serve(listener, Arc::new(builder), cfg.idle_timeout()).await;
    Ok(())
}

/// Accepts connections from `acceptor`, one task per connection.
///
/// A failed accept affects only that connection attempt: it is logged and
/// the loop keeps accepting.
pub async fn serve<A: Acceptor>(mut acceptor: A, builder: Arc<ResponseBuilder>, idle_timeout: Duration) {
    loop {
        let (socket, peer) = match acceptor.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let builder = builder.clone();
        let span = tracing::info_span!("connection", %peer);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, builder, idle_timeout);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}
